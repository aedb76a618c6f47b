//! Translation values, plural categories and interpolation arguments.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Common result type for the workspace.
pub type Result<T> = std::result::Result<T, LexisError>;

/// Workspace-wide error type shared by configuration and loading code.
#[derive(thiserror::Error, Debug)]
pub enum LexisError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A filename format or other template could not be compiled.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// One of the four fixed plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    /// `count == 0`
    Zero,
    /// `count == 1`
    One,
    /// `1 < count <= few_threshold`
    Few,
    /// Everything else, and the final fallback.
    Many,
}

impl PluralCategory {
    /// All categories in selection order.
    pub const ALL: [Self; 4] = [Self::Zero, Self::One, Self::Few, Self::Many];

    /// Name used in resource files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Few => "few",
            Self::Many => "many",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zero" => Ok(Self::Zero),
            "one" => Ok(Self::One),
            "few" => Ok(Self::Few),
            "many" => Ok(Self::Many),
            other => Err(LexisError::InvalidFormat(format!(
                "unknown plural category: {other}"
            ))),
        }
    }
}

/// Mapping of plural category to template string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluralForms(BTreeMap<PluralCategory, String>);

impl PluralForms {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, category: PluralCategory, template: impl Into<String>) -> Self {
        self.insert(category, template);
        self
    }

    /// Inserts or replaces the template for `category`.
    pub fn insert(&mut self, category: PluralCategory, template: impl Into<String>) {
        self.0.insert(category, template.into());
    }

    /// Template for `category`, if defined.
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// Whether `category` is defined.
    #[must_use]
    pub fn contains(&self, category: PluralCategory) -> bool {
        self.0.contains_key(&category)
    }

    /// Iterates over defined categories in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.0.iter().map(|(category, template)| (*category, template.as_str()))
    }

    /// Iterates mutably over the templates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PluralCategory, &mut String)> {
        self.0.iter_mut().map(|(category, template)| (*category, template))
    }

    /// Number of defined categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no category is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(PluralCategory, S)> for PluralForms {
    fn from_iter<I: IntoIterator<Item = (PluralCategory, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, s)| (c, s.into())).collect())
    }
}

/// One member of a variant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variant {
    /// A plain template.
    Text(String),
    /// A pluralizable template.
    Plural(PluralForms),
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<PluralForms> for Variant {
    fn from(value: PluralForms) -> Self {
        Self::Plural(value)
    }
}

/// The value stored for one `(locale, key)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// A template string.
    Scalar(String),
    /// A plural-category mapping.
    Plural(PluralForms),
    /// An ordered list of alternative messages.
    Variants(Vec<Variant>),
}

impl TranslationValue {
    /// The template when this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(template) => Some(template),
            _ => None,
        }
    }

    /// Short name of the value shape, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Plural(_) => "plural",
            Self::Variants(_) => "variants",
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<PluralForms> for TranslationValue {
    fn from(value: PluralForms) -> Self {
        Self::Plural(value)
    }
}

impl From<Vec<Variant>> for TranslationValue {
    fn from(value: Vec<Variant>) -> Self {
        Self::Variants(value)
    }
}

/// A caller-supplied interpolation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl ArgValue {
    /// Integer view used for plural selection and function indices.
    ///
    /// Booleans map to `0`/`1`, whole floats to their integer value and
    /// strings are parsed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Float(_) => None,
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Named interpolation arguments for one lookup.
pub type Args = HashMap<String, ArgValue>;

/// Name of the argument that triggers pluralization.
pub const COUNT_ARG: &str = "count";

/// Macro to create [`Args`] more easily
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(
            args.insert(::std::string::String::from($key), $crate::ArgValue::from($value));
        )+
        args
    }};
}
