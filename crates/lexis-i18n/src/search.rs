//! Hook for loading translations on demand
//!
//! The translator asks a [`ResourceSearch`] for a key whenever the store has
//! no entry for it. File-backed searchers live in the `lexis-loader` crate.

use crate::error::I18nResult;
use crate::store::TranslationStore;
use lexis_config::Settings;

/// A key loaded into the store, with the locale it was loaded for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadedKey {
    /// Locale the value was stored under
    pub locale: String,
    /// Full key of the value
    pub key: String,
}

impl LoadedKey {
    /// Create an entry for `key` in `locale`
    pub fn new(locale: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
        }
    }
}

/// Loads translations into a [`TranslationStore`] when they are first needed
///
/// Implementations only insert raw values; static references in the returned
/// keys are expanded by the caller.
pub trait ResourceSearch: Send {
    /// Try to load `key` for `locale`, returning every key that was inserted
    fn search(
        &mut self,
        key: &str,
        locale: &str,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> I18nResult<Vec<String>>;

    /// Load every resource for `locale`, or for all locales when `None`
    fn load_everything(
        &mut self,
        _locale: Option<&str>,
        _store: &mut TranslationStore,
        _settings: &Settings,
    ) -> I18nResult<Vec<LoadedKey>> {
        Ok(Vec::new())
    }

    /// Drop any cached resource data
    fn forget(&mut self) {}
}

/// A searcher that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearch;

impl ResourceSearch for NoSearch {
    fn search(
        &mut self,
        _key: &str,
        _locale: &str,
        _store: &mut TranslationStore,
        _settings: &Settings,
    ) -> I18nResult<Vec<String>> {
        Ok(Vec::new())
    }
}
