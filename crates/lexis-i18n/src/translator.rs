//! Translation orchestrator

use crate::error::{I18nError, I18nResult};
use crate::expander::StaticExpander;
use crate::formatter::{TemplateFormatter, Translation};
use crate::functions::FunctionRegistry;
use crate::policy::{Handlers, Policy};
use crate::search::{NoSearch, ResourceSearch};
use crate::store::TranslationStore;
use crate::template::Syntax;
use lexis_common::{ArgValue, Args, TranslationValue};
use lexis_config::{Settings, SettingsCache};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves keys to formatted messages
///
/// Lookup order for a key: the store for the requested locale, a resource
/// search for that locale, then the same two steps for the fallback locale.
/// A key found nowhere goes through the missing-translation policy.
pub struct Translator {
    store: TranslationStore,
    functions: Arc<FunctionRegistry>,
    handlers: Handlers,
    settings: SettingsCache,
    syntax: Arc<Syntax>,
    searcher: Box<dyn ResourceSearch>,
}

impl Translator {
    /// Create a translator that only knows values added directly
    pub fn new(settings: Settings) -> I18nResult<Self> {
        Self::with_searcher(settings, NoSearch)
    }

    /// Create a translator that loads missing keys through `searcher`
    pub fn with_searcher<S>(settings: Settings, searcher: S) -> I18nResult<Self>
    where
        S: ResourceSearch + 'static,
    {
        settings.validate()?;
        let syntax = Arc::new(Syntax::from_settings(&settings)?);
        info!("Translator initialized with locale: {}", settings.locale);

        Ok(Self {
            store: TranslationStore::new(),
            functions: Arc::new(FunctionRegistry::new()),
            handlers: Handlers::default(),
            settings: SettingsCache::new(settings),
            syntax,
            searcher: Box::new(searcher),
        })
    }

    /// Snapshot of the active settings
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.get()
    }

    /// Change settings; rejected changes leave the active settings untouched
    pub fn update_settings<F>(&mut self, update: F) -> I18nResult<()>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = (*self.settings.get()).clone();
        update(&mut settings);
        self.apply_settings(settings)
    }

    /// Change one setting by name
    pub fn set(&mut self, name: &str, value: &str) -> I18nResult<()> {
        let mut settings = (*self.settings.get()).clone();
        settings.set(name, value)?;
        self.apply_settings(settings)
    }

    fn apply_settings(&mut self, settings: Settings) -> I18nResult<()> {
        settings.validate()?;
        if !self.syntax.matches_settings(&settings) {
            self.syntax = Arc::new(Syntax::from_settings(&settings)?);
        }
        debug!("Settings updated: {:?}", settings);
        self.settings.update(settings);
        Ok(())
    }

    /// The stored values
    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// Mutable access to the stored values, bypassing expansion
    pub fn store_mut(&mut self) -> &mut TranslationStore {
        &mut self.store
    }

    /// Store a value for `locale`, or the active locale when `None`
    ///
    /// Static references are not expanded; see [`Self::expand_static_refs`].
    pub fn add_translation(
        &mut self,
        key: impl Into<String>,
        value: impl Into<TranslationValue>,
        locale: Option<&str>,
    ) {
        let settings = self.settings.get();
        self.store
            .add(key, value, locale.unwrap_or(&settings.locale));
    }

    /// Whether a value is stored, without searching
    pub fn has_translation(&self, key: &str, locale: Option<&str>) -> bool {
        let settings = self.settings.get();
        self.store.has(key, locale.unwrap_or(&settings.locale))
    }

    /// Inline static references in the stored values of `keys`
    pub fn expand_static_refs<S: AsRef<str>>(&mut self, keys: &[S], locale: &str) -> I18nResult<()> {
        let settings = self.settings.get();
        StaticExpander::new(
            &mut self.store,
            self.searcher.as_mut(),
            &settings,
            &self.syntax,
            locale,
        )
        .expand_keys(keys)
    }

    /// Register a custom function globally, or for one locale
    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F, locale: Option<&str>)
    where
        F: Fn(&Args) -> ArgValue + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registering function '{}' for locale {:?}", name, locale);
        Arc::make_mut(&mut self.functions).register(name, function, locale);
    }

    /// Handle keys missing from every locale; takes precedence over the setting
    pub fn set_missing_translation_handler<F>(&mut self, handler: F)
    where
        F: Fn(&str, &str, &Args) -> String + Send + Sync + 'static,
    {
        self.handlers.translation = Some(Arc::new(handler));
    }

    /// Handle unresolved placeholders; takes precedence over the setting
    pub fn set_missing_placeholder_handler<F>(&mut self, handler: F)
    where
        F: Fn(&str, &str, &str, &str) -> String + Send + Sync + 'static,
    {
        self.handlers.placeholder = Some(Arc::new(handler));
    }

    /// Handle failed plural selection; takes precedence over the setting
    pub fn set_missing_plural_handler<F>(&mut self, handler: F)
    where
        F: Fn(&str, &str, &TranslationValue, Option<i64>) -> String + Send + Sync + 'static,
    {
        self.handlers.plural = Some(Arc::new(handler));
    }

    /// Remove every registered handler
    pub fn clear_handlers(&mut self) {
        self.handlers = Handlers::default();
    }

    /// Translate `key` for `locale`, or the active locale when `None`
    pub fn translate(&mut self, key: &str, locale: Option<&str>, args: &Args) -> I18nResult<Translation> {
        self.resolve(key, locale, args, None)
    }

    /// Like [`Self::translate`], but a key found nowhere yields `default`
    /// instead of going through the missing-translation policy
    pub fn translate_or_default(
        &mut self,
        key: &str,
        locale: Option<&str>,
        args: &Args,
        default: &str,
    ) -> I18nResult<Translation> {
        self.resolve(key, locale, args, Some(default))
    }

    fn resolve(
        &mut self,
        key: &str,
        locale: Option<&str>,
        args: &Args,
        default: Option<&str>,
    ) -> I18nResult<Translation> {
        let settings = self.settings.get();
        let requested = locale.unwrap_or(&settings.locale);

        if let Some(translation) = self.lookup(key, requested, args, &settings)? {
            return Ok(translation);
        }

        // the fallback locale, once tried, is the one the policy reports
        let mut last_locale = requested;
        if let Some(fallback) = settings.fallback.as_deref().filter(|f| *f != requested) {
            warn!(
                "Key '{}' not found in locale {}, falling back to {}",
                key, requested, fallback
            );
            if let Some(translation) = self.lookup(key, fallback, args, &settings)? {
                return Ok(translation);
            }
            last_locale = fallback;
        }

        if let Some(default) = default {
            debug!("Key '{}' not found, using default: '{}'", key, default);
            return Ok(Translation::Text(default.to_string()));
        }

        warn!("Key '{}' not found in locale {}", key, last_locale);
        match self.handlers.translation(&settings) {
            Policy::Error => Err(I18nError::TranslationNotFound {
                key: key.to_string(),
                locale: last_locale.to_string(),
            }),
            Policy::Handler(handler) => Ok(Translation::Text(handler(key, last_locale, args))),
            Policy::Ignore => Ok(Translation::Text(key.to_string())),
        }
    }

    /// Format the value for `(locale, key)`, searching once if it is not stored
    fn lookup(
        &mut self,
        key: &str,
        locale: &str,
        args: &Args,
        settings: &Arc<Settings>,
    ) -> I18nResult<Option<Translation>> {
        if !self.store.has(key, locale) {
            let loaded = self.searcher.search(key, locale, &mut self.store, settings)?;
            if !loaded.is_empty() {
                debug!("Search for '{}' in {} loaded {} keys", key, locale, loaded.len());
                self.expand_static_refs(&loaded, locale)?;
            }
            if !self.store.has(key, locale) {
                return Ok(None);
            }
        }

        let value = self.store.get(key, locale)?;
        let formatter = TemplateFormatter::new(
            key,
            locale,
            args.clone(),
            Arc::clone(settings),
            Arc::clone(&self.syntax),
            Arc::clone(&self.functions),
            self.handlers.clone(),
        );
        formatter.format(value).map(Some)
    }

    /// Load every resource for `locale`, or for all locales when `None`
    ///
    /// Returns the number of keys loaded.
    pub fn load_everything(&mut self, locale: Option<&str>) -> I18nResult<usize> {
        let settings = self.settings.get();
        let loaded = self
            .searcher
            .load_everything(locale, &mut self.store, &settings)?;

        let mut by_locale: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entry in &loaded {
            by_locale
                .entry(entry.locale.as_str())
                .or_default()
                .push(entry.key.as_str());
        }
        for (locale, keys) in by_locale {
            self.expand_static_refs(&keys, locale)?;
        }

        info!("Loaded {} translations", loaded.len());
        Ok(loaded.len())
    }

    /// Drop every stored value and any cached resource data
    pub fn unload_everything(&mut self) {
        self.store.clear(None);
        self.searcher.forget();
        info!("Unloaded all translations");
    }

    /// Unload, then load every resource again
    pub fn reload_everything(&mut self) -> I18nResult<usize> {
        self.unload_everything();
        self.load_everything(None)
    }

    /// Return to a freshly constructed state, keeping the searcher
    pub fn reset(&mut self) -> I18nResult<()> {
        self.unload_everything();
        self.functions = Arc::new(FunctionRegistry::new());
        self.clear_handlers();
        self.apply_settings(Settings::default())
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("store", &self.store)
            .field("functions", &self.functions)
            .field("handlers", &self.handlers)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::LoadedKey;
    use lexis_common::args;
    use lexis_config::MissingMode;

    /// Serves values from a fixed table and records what was asked for
    #[derive(Default)]
    struct TableSearch {
        table: Vec<(&'static str, &'static str, &'static str)>,
        searches: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl ResourceSearch for TableSearch {
        fn search(
            &mut self,
            key: &str,
            locale: &str,
            store: &mut TranslationStore,
            _settings: &Settings,
        ) -> I18nResult<Vec<String>> {
            if let Ok(mut searches) = self.searches.lock() {
                searches.push(format!("{locale}:{key}"));
            }
            let mut loaded = Vec::new();
            for (l, k, v) in &self.table {
                if *l == locale && *k == key {
                    store.add(*k, *v, l);
                    loaded.push((*k).to_string());
                }
            }
            Ok(loaded)
        }

        fn load_everything(
            &mut self,
            locale: Option<&str>,
            store: &mut TranslationStore,
            _settings: &Settings,
        ) -> I18nResult<Vec<LoadedKey>> {
            let mut loaded = Vec::new();
            for (l, k, v) in &self.table {
                if locale.map_or(true, |locale| locale == *l) {
                    store.add(*k, *v, l);
                    loaded.push(LoadedKey::new(*l, *k));
                }
            }
            Ok(loaded)
        }
    }

    fn text(translator: &mut Translator, key: &str, args: &Args) -> String {
        translator
            .translate(key, None, args)
            .unwrap()
            .into_text()
            .unwrap()
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.placeholder_delimiter = String::new();
        assert!(Translator::new(settings).is_err());

        let mut translator = Translator::new(Settings::default()).unwrap();
        assert!(translator
            .update_settings(|s| s.argument_delimiter = "(".into())
            .is_err());
        assert_eq!(translator.settings().argument_delimiter, "|");
    }

    #[test]
    fn test_search_then_fallback() {
        let searcher = TableSearch {
            table: vec![("en", "only.en", "english"), ("fr", "both", "français")],
            ..TableSearch::default()
        };
        let searches = Arc::clone(&searcher.searches);
        let mut translator = Translator::with_searcher(Settings::default(), searcher).unwrap();

        let fr = translator.translate("only.en", Some("fr"), &args!()).unwrap();
        assert_eq!(fr.as_text(), Some("english"));
        let both = translator.translate("both", Some("fr"), &args!()).unwrap();
        assert_eq!(both.as_text(), Some("français"));

        // a second lookup is served from the store
        translator.translate("both", Some("fr"), &args!()).unwrap();
        let searches = searches.lock().unwrap().clone();
        assert_eq!(searches, vec!["fr:only.en", "en:only.en", "fr:both"]);
    }

    #[test]
    fn test_missing_translation_policies() {
        let mut translator = Translator::new(Settings::default()).unwrap();
        assert_eq!(text(&mut translator, "nope", &args!()), "nope");

        let default = translator
            .translate_or_default("nope", None, &args!(), "fallback text")
            .unwrap();
        assert_eq!(default.as_text(), Some("fallback text"));

        translator
            .update_settings(|s| s.on_missing_translation = MissingMode::Error)
            .unwrap();
        match translator.translate("nope", Some("de"), &args!()) {
            Err(err @ I18nError::TranslationNotFound { .. }) => {
                assert_eq!(err.to_string(), "key nope not found");
            }
            other => panic!("expected TranslationNotFound, got {other:?}"),
        }
        // the default still wins over the error mode
        assert!(translator
            .translate_or_default("nope", None, &args!(), "d")
            .is_ok());

        translator.set_missing_translation_handler(|key: &str, locale: &str, args: &Args| {
            format!("[{locale}] {key} ({} args)", args.len())
        });
        let handled = translator
            .translate("nope", Some("de"), &args!["x" => 1])
            .unwrap();
        assert_eq!(handled.as_text(), Some("[en] nope (1 args)"));
    }

    #[test]
    fn test_missing_translation_reports_last_locale_tried() {
        let mut translator = Translator::new(Settings::default()).unwrap();
        translator.set_missing_translation_handler(|key: &str, locale: &str, _: &Args| {
            format!("{locale}:{key}")
        });

        // fallback "en" was tried after "de"
        let handled = translator.translate("nope", Some("de"), &args!()).unwrap();
        assert_eq!(handled.as_text(), Some("en:nope"));

        translator.update_settings(|s| s.fallback = None).unwrap();
        let handled = translator.translate("nope", Some("de"), &args!()).unwrap();
        assert_eq!(handled.as_text(), Some("de:nope"));

        translator.clear_handlers();
        translator
            .update_settings(|s| {
                s.fallback = Some("fr".into());
                s.on_missing_translation = MissingMode::Error;
            })
            .unwrap();
        match translator.translate("nope", Some("de"), &args!()) {
            Err(I18nError::TranslationNotFound { locale, .. }) => assert_eq!(locale, "fr"),
            other => panic!("expected TranslationNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_search_results_are_expanded() {
        let searcher = TableSearch {
            table: vec![("en", "a.b", "%{.c}!"), ("en", "c", "C")],
            ..TableSearch::default()
        };
        let mut translator = Translator::with_searcher(Settings::default(), searcher).unwrap();
        assert_eq!(text(&mut translator, "a.b", &args!()), "C!");
        assert_eq!(
            translator.store().get("a.b", "en").unwrap().as_scalar(),
            Some("C!")
        );
    }

    #[test]
    fn test_load_and_reload_everything() {
        let searcher = TableSearch {
            table: vec![("en", "x", "%{.y}"), ("en", "y", "why"), ("fr", "x", "ex")],
            ..TableSearch::default()
        };
        let mut translator = Translator::with_searcher(Settings::default(), searcher).unwrap();

        assert_eq!(translator.load_everything(Some("en")).unwrap(), 2);
        assert_eq!(
            translator.store().get("x", "en").unwrap().as_scalar(),
            Some("why")
        );
        assert!(!translator.has_translation("x", Some("fr")));

        assert_eq!(translator.reload_everything().unwrap(), 3);
        assert!(translator.has_translation("x", Some("fr")));

        translator.unload_everything();
        assert!(translator.store().is_empty());
    }

    #[test]
    fn test_delimiter_change_recompiles_syntax() {
        let mut translator = Translator::new(Settings::default()).unwrap();
        translator.add_translation("hi", "Hello ${name}", None);
        assert_eq!(text(&mut translator, "hi", &args!["name" => "Ann"]), "Hello ${name}");

        translator.set("placeholder_delimiter", "$").unwrap();
        assert_eq!(text(&mut translator, "hi", &args!["name" => "Ann"]), "Hello Ann");
    }

    #[test]
    fn test_reset() {
        let mut translator = Translator::new(Settings::default()).unwrap();
        translator.add_translation("k", "v", None);
        translator.register_function("f", |_: &Args| ArgValue::Int(0), None);
        translator.set("locale", "fr").unwrap();

        translator.reset().unwrap();
        assert!(translator.store().is_empty());
        assert_eq!(translator.settings().locale, "en");
        translator.add_translation("k", "%{f(a|b)}", None);
        assert_eq!(text(&mut translator, "k", &args!()), "%{f(a|b)}");
    }
}
