//! In-memory translation storage keyed by locale, then by key

use crate::error::{I18nError, I18nResult};
use lexis_common::TranslationValue;
use std::collections::HashMap;
use tracing::debug;

/// Owns every translation value, per locale
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    locales: HashMap<String, HashMap<String, TranslationValue>>,
}

impl TranslationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the same `(locale, key)`
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<TranslationValue>, locale: &str) {
        let key = key.into();
        debug!("Storing translation '{}' for locale {:?}", key, locale);
        self.locales
            .entry(locale.to_string())
            .or_default()
            .insert(key, value.into());
    }

    /// Check if a value exists for the `(locale, key)` pair
    pub fn has(&self, key: &str, locale: &str) -> bool {
        self.locales
            .get(locale)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Get the value for the `(locale, key)` pair
    pub fn get(&self, key: &str, locale: &str) -> I18nResult<&TranslationValue> {
        self.locales
            .get(locale)
            .and_then(|entries| entries.get(key))
            .ok_or_else(|| I18nError::NotFound {
                key: key.to_string(),
                locale: locale.to_string(),
            })
    }

    /// Clear one locale's entries, or every locale when `locale` is `None`
    pub fn clear(&mut self, locale: Option<&str>) {
        match locale {
            Some(locale) => {
                if let Some(entries) = self.locales.get_mut(locale) {
                    entries.clear();
                }
                debug!("Cleared translations for locale {:?}", locale);
            }
            None => {
                self.locales.clear();
                debug!("Cleared all translations");
            }
        }
    }

    /// Locales that have had at least one value stored
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    /// Keys stored for a locale
    pub fn keys(&self, locale: &str) -> Vec<&str> {
        self.locales
            .get(locale)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Total number of stored values across all locales
    pub fn len(&self) -> usize {
        self.locales.values().map(HashMap::len).sum()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_common::{PluralCategory, PluralForms};

    #[test]
    fn test_add_overwrites() {
        let mut store = TranslationStore::new();
        store.add("greet", "Hello", "en");
        store.add("greet", "Hi", "en");

        assert_eq!(store.get("greet", "en").unwrap().as_scalar(), Some("Hi"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_locales_are_separate() {
        let mut store = TranslationStore::new();
        store.add("greet", "Hello", "en");
        store.add("greet", "Salut", "fr");

        assert!(store.has("greet", "fr"));
        assert!(!store.has("greet", "de"));
        assert_eq!(store.get("greet", "fr").unwrap().as_scalar(), Some("Salut"));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = TranslationStore::new();
        let err = store.get("missing", "en").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_values_are_not_validated_on_insert() {
        let mut store = TranslationStore::new();
        store.add(
            "odd",
            PluralForms::new().with(PluralCategory::Zero, "none"),
            "en",
        );
        assert!(store.has("odd", "en"));
    }

    #[test]
    fn test_clear() {
        let mut store = TranslationStore::new();
        store.add("a", "1", "en");
        store.add("b", "2", "fr");

        store.clear(Some("en"));
        assert!(!store.has("a", "en"));
        assert!(store.has("b", "fr"));

        store.clear(Some("de"));
        store.clear(None);
        assert!(store.is_empty());
        assert!(store.locales().is_empty());
    }
}
