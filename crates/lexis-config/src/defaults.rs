//! Default values for every setting.

use crate::schema::{MissingMode, Settings};

/// Default placeholder delimiter.
pub const DEFAULT_PLACEHOLDER_DELIMITER: &str = "%";
/// Default namespace delimiter.
pub const DEFAULT_NAMESPACE_DELIMITER: &str = ".";
/// Default function argument delimiter.
pub const DEFAULT_ARGUMENT_DELIMITER: &str = "|";
/// Default resource filename template.
pub const DEFAULT_FILENAME_FORMAT: &str = "{namespace}.{locale}.{format}";
/// Default `few` plural threshold.
pub const DEFAULT_FEW_THRESHOLD: u32 = 5;

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback: Some("en".to_string()),
            available_locales: vec!["en".to_string()],
            load_path: Vec::new(),
            filename_format: DEFAULT_FILENAME_FORMAT.to_string(),
            file_format: "yml".to_string(),
            encoding: "utf-8".to_string(),
            placeholder_delimiter: DEFAULT_PLACEHOLDER_DELIMITER.to_string(),
            namespace_delimiter: DEFAULT_NAMESPACE_DELIMITER.to_string(),
            argument_delimiter: DEFAULT_ARGUMENT_DELIMITER.to_string(),
            few_threshold: DEFAULT_FEW_THRESHOLD,
            skip_locale_root_data: false,
            enable_memoization: false,
            on_missing_translation: MissingMode::Ignore,
            on_missing_placeholder: MissingMode::Ignore,
            on_missing_plural: MissingMode::Ignore,
        }
    }
}
