//! Resource loading errors

use lexis_i18n::I18nError;
use thiserror::Error;

/// Errors raised while reading and parsing resource files
#[derive(Error, Debug)]
pub enum LoadError {
    /// No parser is registered for the file extension
    #[error("no loader available for extension {0}")]
    NoParser(String),

    /// The file could not be read or decoded
    #[error("error loading file {path}: {message}")]
    Read { path: String, message: String },

    /// The locale root section is absent
    #[error("error getting data from {path}: {locale} not defined")]
    MissingRoot { path: String, locale: String },

    /// The parsed data does not have the expected shape
    #[error("error getting data from {path}: {message}")]
    InvalidData { path: String, message: String },

    /// JSON syntax error
    #[error("invalid JSON: {0}")]
    Json(String),

    /// YAML syntax error
    #[error("invalid YAML: {0}")]
    Yaml(String),

    /// A file's locales cannot be determined
    #[error(
        "Cannot identify locales for {path:?}: filename_format doesn't include locale \
         and skip_locale_root_data is set to True"
    )]
    UnknownLocales { path: String },

    /// Directory traversal failed
    #[error("error walking {path}: {message}")]
    Walk { path: String, message: String },
}

impl From<LoadError> for I18nError {
    fn from(err: LoadError) -> Self {
        I18nError::file_load(err.to_string())
    }
}

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
