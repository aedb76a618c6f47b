//! Plural category selection
//!
//! Four fixed categories are chosen from an integer count:
//!
//! | count | category (if defined) |
//! |-------|-----------------------|
//! | `0` | `zero` |
//! | `1` | `one` |
//! | `2..=few_threshold` | `few` |
//! | anything else, or the category above is undefined | `many` |

use crate::error::{I18nError, I18nResult};
use crate::policy::Policy;
use lexis_common::{PluralCategory, PluralForms, TranslationValue};
use lexis_config::Settings;
use tracing::{debug, warn};

/// Pick the category for `count` given the categories `forms` defines
///
/// Falls through to [`PluralCategory::Many`] whenever the preferred category
/// is not defined; the returned category may itself be undefined.
pub fn select_category(count: i64, few_threshold: i64, forms: &PluralForms) -> PluralCategory {
    let preferred = match count {
        0 => Some(PluralCategory::Zero),
        1 => Some(PluralCategory::One),
        n if n > 1 && n <= few_threshold => Some(PluralCategory::Few),
        _ => None,
    };
    preferred
        .filter(|category| forms.contains(*category))
        .unwrap_or(PluralCategory::Many)
}

/// Reduces a value plus a count to one template, applying the missing-plural policy
#[derive(Debug, Clone, Copy)]
pub struct PluralSelector<'a> {
    key: &'a str,
    locale: &'a str,
    few_threshold: i64,
}

impl<'a> PluralSelector<'a> {
    /// Create a selector for one translation key
    pub fn new(key: &'a str, locale: &'a str, settings: &Settings) -> Self {
        Self {
            key,
            locale,
            few_threshold: i64::from(settings.few_threshold),
        }
    }

    /// Select the template for `count` without applying any policy
    pub fn try_resolve<'v>(&self, value: &'v TranslationValue, count: i64) -> I18nResult<&'v str> {
        let forms = match value {
            TranslationValue::Plural(forms) => forms,
            _ => {
                return Err(I18nError::PluralMismatch {
                    key: self.key.to_string(),
                })
            }
        };
        self.select(forms, count)
    }

    fn select<'v>(&self, forms: &'v PluralForms, count: i64) -> I18nResult<&'v str> {
        let category = select_category(count, self.few_threshold, forms);
        debug!(
            "Selected plural category {} for key '{}' with count {}",
            category, self.key, count
        );
        forms
            .get(category)
            .ok_or_else(|| I18nError::PluralCategoryMissing {
                key: self.key.to_string(),
                category: category.to_string(),
            })
    }

    /// Select the template for `count`, applying the missing-plural policy on failure
    ///
    /// With the permissive default a non-plural scalar is returned unchanged
    /// and a mapping lacking the selected category yields the key itself.
    pub fn resolve(
        &self,
        value: &TranslationValue,
        count: i64,
        policy: &Policy<'_, dyn Fn(&str, &str, &TranslationValue, Option<i64>) -> String + Send + Sync>,
    ) -> I18nResult<String> {
        match self.try_resolve(value, count) {
            Ok(template) => Ok(template.to_string()),
            Err(err) => {
                warn!("Plural selection failed: {}", err);
                match policy {
                    Policy::Error => Err(err),
                    Policy::Handler(handler) => Ok(handler(self.key, self.locale, value, Some(count))),
                    Policy::Ignore => Ok(match (&err, value) {
                        (I18nError::PluralMismatch { .. }, TranslationValue::Scalar(template)) => {
                            template.clone()
                        }
                        _ => self.key.to_string(),
                    }),
                }
            }
        }
    }

    /// Handle a plural mapping formatted without a count
    pub fn resolve_without_count(
        &self,
        value: &TranslationValue,
        policy: &Policy<'_, dyn Fn(&str, &str, &TranslationValue, Option<i64>) -> String + Send + Sync>,
    ) -> I18nResult<String> {
        let err = I18nError::MissingCount {
            key: self.key.to_string(),
        };
        warn!("{}", err);
        match policy {
            Policy::Error => Err(err),
            Policy::Handler(handler) => Ok(handler(self.key, self.locale, value, None)),
            Policy::Ignore => Ok(self.key.to_string()),
        }
    }
}
