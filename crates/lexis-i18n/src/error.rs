//! Error types for translation resolution and formatting

use lexis_common::LexisError;
use thiserror::Error;

/// Errors that can occur while resolving or formatting a translation
#[derive(Error, Debug)]
pub enum I18nError {
    /// The `(locale, key)` pair is not in the store
    #[error("no translation stored for '{key}' in locale '{locale}'")]
    NotFound { key: String, locale: String },

    /// The key could not be resolved in any locale
    #[error("key {key} not found")]
    TranslationNotFound { key: String, locale: String },

    /// A count was supplied for a value that is not a plural mapping
    #[error("use of count without plural mapping for key {key}")]
    PluralMismatch { key: String },

    /// The selected plural category, and `many`, are both absent
    #[error("\"many\" not defined for key {key} (selected {category})")]
    PluralCategoryMissing { key: String, category: String },

    /// A plural mapping was formatted without a count
    #[error("plural mapping for key {key} used without count")]
    MissingCount { key: String },

    /// A named placeholder has no matching argument
    #[error("no argument {name:?} for placeholder in {template:?} (key {key})")]
    MissingPlaceholder {
        key: String,
        name: String,
        template: String,
    },

    /// No custom function of that name exists for the locale or globally
    #[error("No function {name:?} found for locale {locale:?} (in {template:?})")]
    FunctionNotFound {
        name: String,
        locale: String,
        template: String,
    },

    /// A custom function returned an unusable index
    #[error("No argument {index} for function {name:?} (in {template:?})")]
    ArgumentIndex {
        name: String,
        index: String,
        template: String,
    },

    /// A template contains a placeholder delimiter with no valid token
    #[error("Invalid placeholder in template {template:?} at position {position}")]
    InvalidTemplate { template: String, position: usize },

    /// A static reference resolves to nothing
    #[error("no value found for static reference {reference:?} (in {key:?}){detail}")]
    InvalidStaticReference {
        reference: String,
        key: String,
        detail: String,
    },

    /// Static references form a cycle
    #[error("cyclic static reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// A resource file could not be loaded
    #[error("{message}")]
    FileLoad { message: String },

    /// Settings were rejected
    #[error(transparent)]
    Config(#[from] LexisError),
}

impl I18nError {
    /// Shorthand for a [`I18nError::FileLoad`] error.
    pub fn file_load(message: impl Into<String>) -> Self {
        Self::FileLoad {
            message: message.into(),
        }
    }

    /// Whether this is a plain store miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
