//! Settings schema definitions using serde with validation.

use crate::filename::FilenameFormat;
use lexis_common::{LexisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main settings structure for the translation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Locale used when the caller does not name one.
    pub locale: String,
    /// Locale tried when a key is missing from the requested one.
    pub fallback: Option<String>,
    /// Locales the application ships.
    pub available_locales: Vec<String>,
    /// Directories searched for resource files.
    pub load_path: Vec<PathBuf>,
    /// Resource filename template, e.g. `{namespace}.{locale}.{format}`.
    pub filename_format: String,
    /// Extension of resource files to search for.
    pub file_format: String,
    /// Text encoding label of resource files.
    pub encoding: String,
    /// Delimiter introducing a placeholder.
    pub placeholder_delimiter: String,
    /// Delimiter between namespace segments of a key.
    pub namespace_delimiter: String,
    /// Delimiter between literal arguments of a function-call placeholder.
    pub argument_delimiter: String,
    /// Largest count selecting the `few` plural category.
    #[serde(alias = "plural_few")]
    pub few_threshold: u32,
    /// Resource files are not nested under a locale root key.
    pub skip_locale_root_data: bool,
    /// Never read the same resource file twice.
    pub enable_memoization: bool,
    /// Behaviour when a key cannot be resolved in any locale.
    pub on_missing_translation: MissingMode,
    /// Behaviour when a placeholder has no argument or function.
    pub on_missing_placeholder: MissingMode,
    /// Behaviour when a plural category cannot be selected.
    pub on_missing_plural: MissingMode,
}

/// Serializable part of a missing-value policy.
///
/// Handler functions are registered on the translator and take precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMode {
    /// Return the key or leave the placeholder untouched.
    #[default]
    Ignore,
    /// Propagate an error to the caller.
    Error,
}

impl fmt::Display for MissingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::Error => f.write_str("error"),
        }
    }
}

impl FromStr for MissingMode {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "ignore" | "none" => Ok(Self::Ignore),
            "error" => Ok(Self::Error),
            other => Err(LexisError::Config(format!(
                "invalid missing-value mode: {other}"
            ))),
        }
    }
}

impl Settings {
    /// Validates the settings.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }

    /// Compiles the configured filename format.
    pub fn filename_format(&self) -> Result<FilenameFormat> {
        FilenameFormat::compile(&self.filename_format)
    }

    /// Sets one option from its string form.
    ///
    /// Unknown option names are rejected; `filename_format` is compiled
    /// before it is accepted.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "locale" => self.locale = value.to_string(),
            "fallback" => {
                self.fallback = match value {
                    "" | "none" => None,
                    other => Some(other.to_string()),
                };
            }
            "available_locales" => {
                self.available_locales = value
                    .split(',')
                    .map(str::trim)
                    .filter(|locale| !locale.is_empty())
                    .map(String::from)
                    .collect();
            }
            "load_path" => self.load_path = std::env::split_paths(value).collect(),
            "filename_format" => {
                FilenameFormat::compile(value)?;
                self.filename_format = value.to_string();
            }
            "file_format" => self.file_format = value.to_string(),
            "encoding" => self.encoding = value.to_string(),
            "placeholder_delimiter" => self.placeholder_delimiter = value.to_string(),
            "namespace_delimiter" => self.namespace_delimiter = value.to_string(),
            "argument_delimiter" => self.argument_delimiter = value.to_string(),
            "few_threshold" | "plural_few" => self.few_threshold = parse_value(name, value)?,
            "skip_locale_root_data" => self.skip_locale_root_data = parse_value(name, value)?,
            "enable_memoization" => self.enable_memoization = parse_value(name, value)?,
            "on_missing_translation" => self.on_missing_translation = value.parse()?,
            "on_missing_placeholder" => self.on_missing_placeholder = value.parse()?,
            "on_missing_plural" => self.on_missing_plural = value.parse()?,
            _ => return Err(LexisError::Config(format!("Invalid setting: {name}"))),
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| LexisError::Config(format!("invalid value for {name}: {value:?}")))
}
