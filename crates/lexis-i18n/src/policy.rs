//! Missing-value policies: ignore, error, or a user handler
//!
//! Each kind of miss (translation, placeholder, plural) is governed by the
//! matching `on_missing_*` mode in [`Settings`], unless a handler function
//! has been registered for it, in which case the handler wins.

use lexis_common::{Args, TranslationValue};
use lexis_config::{MissingMode, Settings};
use std::fmt;
use std::sync::Arc;

/// `(key, locale, args) -> replacement` for a key missing in every locale
pub type TranslationHandler = Arc<dyn Fn(&str, &str, &Args) -> String + Send + Sync>;

/// `(key, locale, template, placeholder) -> replacement` for an unresolved placeholder
pub type PlaceholderHandler = Arc<dyn Fn(&str, &str, &str, &str) -> String + Send + Sync>;

/// `(key, locale, value, count) -> template` for a failed plural selection
///
/// `count` is `None` when a plural mapping was formatted without a count.
pub type PluralHandler =
    Arc<dyn Fn(&str, &str, &TranslationValue, Option<i64>) -> String + Send + Sync>;

/// What to do about one miss
pub enum Policy<'a, H: ?Sized> {
    /// Permissive default
    Ignore,
    /// Propagate the error
    Error,
    /// Ask the handler for a replacement
    Handler(&'a H),
}

/// Registered handler functions
#[derive(Clone, Default)]
pub struct Handlers {
    /// Called for keys missing from every locale
    pub translation: Option<TranslationHandler>,
    /// Called for unresolved placeholders
    pub placeholder: Option<PlaceholderHandler>,
    /// Called for failed plural selections
    pub plural: Option<PluralHandler>,
}

impl Handlers {
    /// Policy for a key missing from every locale
    pub fn translation<'a>(
        &'a self,
        settings: &Settings,
    ) -> Policy<'a, dyn Fn(&str, &str, &Args) -> String + Send + Sync> {
        resolve(self.translation.as_deref(), settings.on_missing_translation)
    }

    /// Policy for an unresolved placeholder
    pub fn placeholder<'a>(
        &'a self,
        settings: &Settings,
    ) -> Policy<'a, dyn Fn(&str, &str, &str, &str) -> String + Send + Sync> {
        resolve(self.placeholder.as_deref(), settings.on_missing_placeholder)
    }

    /// Policy for a failed plural selection
    pub fn plural<'a>(
        &'a self,
        settings: &Settings,
    ) -> Policy<'a, dyn Fn(&str, &str, &TranslationValue, Option<i64>) -> String + Send + Sync> {
        resolve(self.plural.as_deref(), settings.on_missing_plural)
    }
}

fn resolve<H: ?Sized>(handler: Option<&H>, mode: MissingMode) -> Policy<'_, H> {
    match (handler, mode) {
        (Some(handler), _) => Policy::Handler(handler),
        (None, MissingMode::Error) => Policy::Error,
        (None, MissingMode::Ignore) => Policy::Ignore,
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("translation", &self.translation.is_some())
            .field("placeholder", &self.placeholder.is_some())
            .field("plural", &self.plural.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_takes_precedence_over_mode() {
        let mut settings = Settings::default();
        settings.on_missing_placeholder = MissingMode::Error;

        let mut handlers = Handlers::default();
        assert!(matches!(handlers.placeholder(&settings), Policy::Error));

        handlers.placeholder = Some(Arc::new(|_: &str, _: &str, _: &str, name: &str| {
            format!("<{name}>")
        }));
        match handlers.placeholder(&settings) {
            Policy::Handler(handler) => assert_eq!(handler("k", "en", "t", "x"), "<x>"),
            _ => panic!("expected handler policy"),
        }
    }

    #[test]
    fn test_default_is_ignore() {
        let settings = Settings::default();
        let handlers = Handlers::default();
        assert!(matches!(handlers.translation(&settings), Policy::Ignore));
        assert!(matches!(handlers.plural(&settings), Policy::Ignore));
    }
}
