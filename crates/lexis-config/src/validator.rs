//! Runtime validation of settings.

use crate::filename::FilenameFormat;
use crate::schema::Settings;
use lexis_common::{LexisError, Result};

/// Settings validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a settings value.
    pub fn validate(settings: &Settings) -> Result<()> {
        Self::validate_delimiters(settings)?;

        if settings.few_threshold == 0 {
            return Err(LexisError::Config(
                "few_threshold must be at least 1".to_string(),
            ));
        }

        if settings.locale.is_empty() {
            return Err(LexisError::Config("locale cannot be empty".to_string()));
        }

        FilenameFormat::compile(&settings.filename_format)?;
        Ok(())
    }

    fn validate_delimiters(settings: &Settings) -> Result<()> {
        let delimiters = [
            ("placeholder_delimiter", &settings.placeholder_delimiter),
            ("namespace_delimiter", &settings.namespace_delimiter),
            ("argument_delimiter", &settings.argument_delimiter),
        ];
        for (name, value) in delimiters {
            if value.is_empty() {
                return Err(LexisError::Config(format!("{name} cannot be empty")));
            }
        }

        let placeholder = &settings.placeholder_delimiter;
        if placeholder
            .chars()
            .any(|c| c == '{' || c == '}' || c.is_alphanumeric() || c == '_')
        {
            return Err(LexisError::Config(format!(
                "placeholder_delimiter {placeholder:?} may not contain braces or word characters"
            )));
        }

        let namespace = &settings.namespace_delimiter;
        if namespace.chars().any(|c| c.is_alphanumeric() || c == '_') {
            return Err(LexisError::Config(format!(
                "namespace_delimiter {namespace:?} may not contain word characters"
            )));
        }

        let argument = &settings.argument_delimiter;
        if argument.chars().any(|c| "(){}".contains(c)) {
            return Err(LexisError::Config(format!(
                "argument_delimiter {argument:?} may not contain parentheses or braces"
            )));
        }

        Ok(())
    }
}
