//! Custom functions callable from `%{name(a|b|...)}` placeholders

use lexis_common::{ArgValue, Args};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A custom function: receives every caller argument and returns the index
/// of the literal argument to substitute
pub type CustomFunction = Arc<dyn Fn(&Args) -> ArgValue + Send + Sync>;

/// Name to function mapping with a global scope and per-locale scopes
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    global: HashMap<String, CustomFunction>,
    locales: HashMap<String, HashMap<String, CustomFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function globally, or for one locale
    pub fn register<F>(&mut self, name: impl Into<String>, function: F, locale: Option<&str>)
    where
        F: Fn(&Args) -> ArgValue + Send + Sync + 'static,
    {
        let function: CustomFunction = Arc::new(function);
        match locale {
            Some(locale) => {
                self.locales
                    .entry(locale.to_string())
                    .or_default()
                    .insert(name.into(), function);
            }
            None => {
                self.global.insert(name.into(), function);
            }
        }
    }

    /// Find a function, preferring the locale scope over the global one
    pub fn lookup(&self, name: &str, locale: &str) -> Option<&CustomFunction> {
        self.locales
            .get(locale)
            .and_then(|functions| functions.get(name))
            .or_else(|| self.global.get(name))
    }

    /// Remove every registered function
    pub fn clear(&mut self) {
        self.global.clear();
        self.locales.clear();
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut global: Vec<_> = self.global.keys().collect();
        global.sort();
        f.debug_struct("FunctionRegistry")
            .field("global", &global)
            .field("locales", &self.locales.keys().collect::<Vec<_>>())
            .finish()
    }
}
