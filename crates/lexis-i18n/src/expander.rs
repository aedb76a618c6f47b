//! Static reference expansion
//!
//! Inlines `%{.key}` and `%{ns.key}` references into stored values so that
//! formatting never has to follow them. A relative reference found in
//! `a.b.k` tries `a.b.<ref>`, then `a.<ref>`, then `<ref>`, and finally asks
//! the resource searcher for `<ref>`.

use crate::error::{I18nError, I18nResult};
use crate::search::ResourceSearch;
use crate::store::TranslationStore;
use crate::template::{StaticReference, Syntax, Token};
use lexis_common::{TranslationValue, Variant};
use lexis_config::Settings;
use tracing::{debug, trace};

/// Expands static references for the keys of one locale
pub struct StaticExpander<'a> {
    store: &'a mut TranslationStore,
    searcher: &'a mut dyn ResourceSearch,
    settings: &'a Settings,
    syntax: &'a Syntax,
    locale: &'a str,
    in_progress: Vec<String>,
}

impl<'a> StaticExpander<'a> {
    /// Create an expander writing to `store` for `locale`
    pub fn new(
        store: &'a mut TranslationStore,
        searcher: &'a mut dyn ResourceSearch,
        settings: &'a Settings,
        syntax: &'a Syntax,
        locale: &'a str,
    ) -> Self {
        Self {
            store,
            searcher,
            settings,
            syntax,
            locale,
            in_progress: Vec::new(),
        }
    }

    /// Expand every reference in the given keys, rewriting their stored values
    ///
    /// Keys with no stored value for the locale are skipped.
    pub fn expand_keys<S: AsRef<str>>(&mut self, keys: &[S]) -> I18nResult<()> {
        for key in keys {
            let key = key.as_ref();
            if self.store.has(key, self.locale) {
                self.expand_key(key)?;
            }
        }
        Ok(())
    }

    fn expand_key(&mut self, key: &str) -> I18nResult<()> {
        if self.in_progress.iter().any(|k| k == key) {
            let mut chain = self.in_progress.clone();
            chain.push(key.to_string());
            return Err(I18nError::CyclicReference { chain });
        }

        let value = self.store.get(key, self.locale)?.clone();
        if !self.has_references(&value) {
            return Ok(());
        }

        trace!("Expanding static references in '{}'", key);
        self.in_progress.push(key.to_string());
        let expanded = self.expand_value(key, value);
        self.in_progress.pop();

        self.store.add(key, expanded?, self.locale);
        Ok(())
    }

    fn has_references(&self, value: &TranslationValue) -> bool {
        let syntax = self.syntax;
        let has = |template: &str| {
            syntax.tokenize(template).iter().any(|token| {
                matches!(token, Token::Placeholder(p) if syntax.static_reference(p).is_some())
            })
        };
        match value {
            TranslationValue::Scalar(template) => has(template),
            TranslationValue::Plural(forms) => forms.iter().any(|(_, template)| has(template)),
            TranslationValue::Variants(variants) => variants.iter().any(|variant| match variant {
                Variant::Text(template) => has(template),
                Variant::Plural(forms) => forms.iter().any(|(_, template)| has(template)),
            }),
        }
    }

    fn expand_value(&mut self, key: &str, value: TranslationValue) -> I18nResult<TranslationValue> {
        Ok(match value {
            TranslationValue::Scalar(template) => {
                TranslationValue::Scalar(self.expand_template(key, &template)?)
            }
            TranslationValue::Plural(mut forms) => {
                for (_, template) in forms.iter_mut() {
                    *template = self.expand_template(key, template)?;
                }
                TranslationValue::Plural(forms)
            }
            TranslationValue::Variants(variants) => TranslationValue::Variants(
                variants
                    .into_iter()
                    .map(|variant| self.expand_variant(key, variant))
                    .collect::<I18nResult<_>>()?,
            ),
        })
    }

    fn expand_variant(&mut self, key: &str, variant: Variant) -> I18nResult<Variant> {
        Ok(match variant {
            Variant::Text(template) => Variant::Text(self.expand_template(key, &template)?),
            Variant::Plural(mut forms) => {
                for (_, template) in forms.iter_mut() {
                    *template = self.expand_template(key, template)?;
                }
                Variant::Plural(forms)
            }
        })
    }

    /// Substitute references; every other token is kept as written
    fn expand_template(&mut self, key: &str, template: &str) -> I18nResult<String> {
        let syntax = self.syntax;
        let mut out = String::with_capacity(template.len());

        for token in syntax.tokenize(template) {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Escaped { raw } | Token::Invalid { raw, .. } => out.push_str(raw),
                Token::Placeholder(placeholder) => match syntax.static_reference(&placeholder) {
                    Some(reference) => out.push_str(&self.resolve(key, reference)?),
                    None => out.push_str(placeholder.raw),
                },
            }
        }
        Ok(out)
    }

    fn resolve(&mut self, key: &str, reference: StaticReference<'_>) -> I18nResult<String> {
        for candidate in self.syntax.reference_candidates(key, reference) {
            if self.store.has(&candidate, self.locale) {
                debug!("Static reference in '{}' resolved to '{}'", key, candidate);
                self.expand_key(&candidate)?;
                return self.inline(key, &candidate);
            }
        }

        let target = reference.target();
        let loaded = self
            .searcher
            .search(target, self.locale, &mut *self.store, self.settings)?;
        for loaded_key in &loaded {
            if !self.in_progress.contains(loaded_key) {
                self.expand_key(loaded_key)?;
            }
        }
        if self.store.has(target, self.locale) {
            debug!("Static reference in '{}' loaded '{}'", key, target);
            return self.inline(key, target);
        }

        Err(I18nError::InvalidStaticReference {
            reference: target.to_string(),
            key: key.to_string(),
            detail: String::new(),
        })
    }

    fn inline(&self, key: &str, target: &str) -> I18nResult<String> {
        match self.store.get(target, self.locale)? {
            TranslationValue::Scalar(template) => Ok(template.clone()),
            other => Err(I18nError::InvalidStaticReference {
                reference: target.to_string(),
                key: key.to_string(),
                detail: format!(": {} value cannot be inlined", other.kind()),
            }),
        }
    }
}
