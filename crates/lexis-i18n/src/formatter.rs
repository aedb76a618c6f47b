//! Template formatting
//!
//! Formatting a value happens in two phases. Pluralization first reduces the
//! value to template strings using the `count` argument; substitution then
//! replaces placeholders with caller arguments or custom function picks.
//! Variant lists are pluralized eagerly and substituted lazily, one member at
//! a time, through [`VariantSet`].

use crate::error::{I18nError, I18nResult};
use crate::functions::FunctionRegistry;
use crate::plural::PluralSelector;
use crate::policy::{Handlers, Policy};
use crate::template::{Placeholder, PlaceholderKind, Syntax, Token};
use lexis_common::{ArgValue, Args, TranslationValue, Variant, COUNT_ARG};
use lexis_config::Settings;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;
use tracing::{debug, warn};

/// A formatted translation
#[derive(Debug, Clone)]
pub enum Translation {
    /// A single message
    Text(String),
    /// A list of alternative messages, formatted on access
    Variants(VariantSet),
}

impl Translation {
    /// The message, when this is a single one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Variants(_) => None,
        }
    }

    /// Consume into the message, when this is a single one
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Variants(_) => None,
        }
    }

    /// The variant list, when this is one
    pub fn as_variants(&self) -> Option<&VariantSet> {
        match self {
            Self::Text(_) => None,
            Self::Variants(variants) => Some(variants),
        }
    }
}

impl From<String> for Translation {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Variant members awaiting substitution
///
/// With a `count` every member is pluralized once, up front. Without one,
/// plural members keep their mapping and are resolved when accessed.
/// Nothing is cached: every access formats its member again.
#[derive(Debug, Clone)]
pub struct VariantSet {
    members: Vec<Variant>,
    formatter: TemplateFormatter,
}

impl VariantSet {
    /// Number of variants
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the list has no variants
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members as held for formatting
    pub fn members(&self) -> &[Variant] {
        &self.members
    }

    /// Format the variant at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<I18nResult<String>> {
        self.members
            .get(index)
            .map(|member| self.formatter.format_member(member))
    }

    /// Format the variants in `range`, clamped to the list bounds
    pub fn slice(&self, range: impl RangeBounds<usize>) -> I18nResult<Vec<String>> {
        let len = self.members.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .clamp(start, len);

        self.members[start..end]
            .iter()
            .map(|member| self.formatter.format_member(member))
            .collect()
    }

    /// Format every variant
    pub fn format_all(&self) -> I18nResult<Vec<String>> {
        self.slice(..)
    }
}

/// Formats the values of one key for one lookup
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    key: String,
    locale: String,
    args: Args,
    settings: Arc<Settings>,
    syntax: Arc<Syntax>,
    functions: Arc<FunctionRegistry>,
    handlers: Handlers,
}

impl TemplateFormatter {
    /// Create a formatter for `key` in `locale` with the caller's arguments
    pub fn new(
        key: impl Into<String>,
        locale: impl Into<String>,
        args: Args,
        settings: Arc<Settings>,
        syntax: Arc<Syntax>,
        functions: Arc<FunctionRegistry>,
        handlers: Handlers,
    ) -> Self {
        Self {
            key: key.into(),
            locale: locale.into(),
            args,
            settings,
            syntax,
            functions,
            handlers,
        }
    }

    /// Pluralize and substitute a stored value
    pub fn format(&self, value: &TranslationValue) -> I18nResult<Translation> {
        match value {
            TranslationValue::Variants(variants) => {
                let members = if self.count().is_some() {
                    variants
                        .iter()
                        .map(|variant| self.pluralize_variant(variant).map(Variant::Text))
                        .collect::<I18nResult<Vec<_>>>()?
                } else {
                    variants.clone()
                };
                Ok(Translation::Variants(VariantSet {
                    members,
                    formatter: self.clone(),
                }))
            }
            other => {
                let template = self.pluralize(other)?;
                self.substitute(&template).map(Translation::Text)
            }
        }
    }

    /// The `count` argument as an integer, if usable
    fn count(&self) -> Option<i64> {
        let value = self.args.get(COUNT_ARG)?;
        let count = value.as_integer();
        if count.is_none() {
            warn!(
                "Ignoring non-integer count {:?} for key '{}'",
                value, self.key
            );
        }
        count
    }

    /// Reduce a value to one template
    fn pluralize(&self, value: &TranslationValue) -> I18nResult<String> {
        let selector = PluralSelector::new(&self.key, &self.locale, &self.settings);
        let policy = self.handlers.plural(&self.settings);
        match (self.count(), value) {
            (Some(count), _) => selector.resolve(value, count, &policy),
            (None, TranslationValue::Scalar(template)) => Ok(template.clone()),
            (None, _) => selector.resolve_without_count(value, &policy),
        }
    }

    /// Text members of a variant list are never plural mismatches
    fn pluralize_variant(&self, variant: &Variant) -> I18nResult<String> {
        match variant {
            Variant::Text(template) => Ok(template.clone()),
            Variant::Plural(forms) => self.pluralize(&TranslationValue::Plural(forms.clone())),
        }
    }

    /// Pluralize one variant member if needed, then substitute it
    fn format_member(&self, member: &Variant) -> I18nResult<String> {
        match member {
            Variant::Text(template) => self.substitute(template),
            Variant::Plural(_) => self.substitute(&self.pluralize_variant(member)?),
        }
    }

    /// Replace every placeholder in `template`
    pub fn substitute(&self, template: &str) -> I18nResult<String> {
        let mut out = String::with_capacity(template.len());
        for token in self.syntax.tokenize(template) {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Escaped { .. } => out.push_str(self.syntax.placeholder_delimiter()),
                Token::Invalid { position, .. } => {
                    return Err(I18nError::InvalidTemplate {
                        template: template.to_string(),
                        position,
                    })
                }
                Token::Placeholder(placeholder) => {
                    out.push_str(&self.placeholder(template, &placeholder)?);
                }
            }
        }
        Ok(out)
    }

    fn placeholder(&self, template: &str, placeholder: &Placeholder<'_>) -> I18nResult<String> {
        let miss = match &placeholder.kind {
            PlaceholderKind::Named(name) => match self.args.get(*name) {
                Some(value) => return Ok(value.to_string()),
                None => I18nError::MissingPlaceholder {
                    key: self.key.clone(),
                    name: (*name).to_string(),
                    template: template.to_string(),
                },
            },
            PlaceholderKind::Call { name, args } => {
                match self.functions.lookup(name, &self.locale) {
                    Some(function) => return self.call(name, args, function(&self.args), template),
                    None => I18nError::FunctionNotFound {
                        name: (*name).to_string(),
                        locale: self.locale.clone(),
                        template: template.to_string(),
                    },
                }
            }
        };

        debug!("Unresolved placeholder: {}", miss);
        match self.handlers.placeholder(&self.settings) {
            Policy::Error => Err(miss),
            Policy::Handler(handler) => Ok(handler(&self.key, &self.locale, template, placeholder.body)),
            Policy::Ignore => Ok(placeholder.raw.to_string()),
        }
    }

    /// Pick the literal argument a custom function pointed at
    fn call(&self, name: &str, args: &[&str], picked: ArgValue, template: &str) -> I18nResult<String> {
        let index = match picked {
            ArgValue::Bool(b) => Some(usize::from(b)),
            ArgValue::Int(i) => usize::try_from(i).ok(),
            ArgValue::Float(_) | ArgValue::Str(_) => None,
        };
        index
            .and_then(|index| args.get(index))
            .map(|arg| (*arg).to_string())
            .ok_or_else(|| I18nError::ArgumentIndex {
                name: name.to_string(),
                index: picked.to_string(),
                template: template.to_string(),
            })
    }
}
