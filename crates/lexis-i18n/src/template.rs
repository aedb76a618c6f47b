//! Placeholder tokenizer
//!
//! A template is literal text interleaved with placeholders introduced by the
//! placeholder delimiter (`%` by default):
//!
//! - `%%` is an escaped, literal delimiter
//! - `%{name}` / `%name` reference a caller argument
//! - `%{name(a|b|c)}` / `%name(a|b|c)` call a custom function that picks one
//!   of the literal arguments
//! - `%{.key}` / `%.key` reference another message relative to the current
//!   namespace, and `%{ns.key}` references another message by its full key
//!
//! A delimiter followed by anything else is invalid.

use crate::error::{I18nError, I18nResult};
use lexis_common::strip_leading;
use lexis_config::Settings;
use regex::{Captures, Regex};

/// One piece of a tokenized template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'t> {
    /// Literal text
    Text(&'t str),
    /// A doubled delimiter; `raw` is the doubled form
    Escaped {
        /// Source text
        raw: &'t str,
    },
    /// A placeholder
    Placeholder(Placeholder<'t>),
    /// A delimiter with no valid token after it
    Invalid {
        /// The dangling delimiter
        raw: &'t str,
        /// Byte offset of the delimiter in the template
        position: usize,
    },
}

/// A parsed placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Full source text, delimiter and braces included
    pub raw: &'t str,
    /// Text between the braces, or after the delimiter when unbraced
    pub body: &'t str,
    /// Whether the `{...}` form was used
    pub braced: bool,
    /// Parsed reference
    pub kind: PlaceholderKind<'t>,
}

/// What a placeholder refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind<'t> {
    /// A caller argument (or a message key, see [`Syntax::static_reference`])
    Named(&'t str),
    /// A custom function call with its literal arguments
    Call {
        /// Function name
        name: &'t str,
        /// Literal arguments split on the argument delimiter
        args: Vec<&'t str>,
    },
}

/// Target of a static reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticReference<'t> {
    /// `%{.key}`: resolved against the enclosing namespaces, innermost first
    Relative(&'t str),
    /// `%{ns.key}`: a full key
    Absolute(&'t str),
}

impl<'t> StaticReference<'t> {
    /// Key to search for when no namespace-relative match exists
    pub fn target(&self) -> &'t str {
        match self {
            Self::Relative(key) | Self::Absolute(key) => key,
        }
    }
}

/// Compiled placeholder grammar for one set of delimiters
#[derive(Debug, Clone)]
pub struct Syntax {
    pattern: Regex,
    placeholder_delimiter: String,
    namespace_delimiter: String,
    argument_delimiter: String,
}

impl Syntax {
    /// Compile the grammar for the given delimiters
    pub fn new(
        placeholder_delimiter: &str,
        namespace_delimiter: &str,
        argument_delimiter: &str,
    ) -> I18nResult<Self> {
        let d = regex::escape(placeholder_delimiter);
        let ns = regex::escape(namespace_delimiter);
        let call = r"\w+(?:\([^(){}]*\))?";
        let dotted = format!(r"(?:{ns})*\w+(?:{ns}\w+)*(?:\([^(){{}}]*\))?");
        let relative = format!(r"(?:{ns})+\w+(?:{ns}\w+)*");

        let pattern = format!(
            r"{d}(?:(?P<escaped>{d})|\{{(?P<braced>{dotted})\}}|(?P<named>{relative}|{call})|(?P<invalid>))"
        );
        let pattern = Regex::new(&pattern).map_err(|e| {
            lexis_common::LexisError::InvalidFormat(format!("placeholder grammar: {e}"))
        })?;

        Ok(Self {
            pattern,
            placeholder_delimiter: placeholder_delimiter.to_string(),
            namespace_delimiter: namespace_delimiter.to_string(),
            argument_delimiter: argument_delimiter.to_string(),
        })
    }

    /// Compile the grammar for the delimiters in `settings`
    pub fn from_settings(settings: &Settings) -> I18nResult<Self> {
        Self::new(
            &settings.placeholder_delimiter,
            &settings.namespace_delimiter,
            &settings.argument_delimiter,
        )
    }

    /// The placeholder delimiter
    pub fn placeholder_delimiter(&self) -> &str {
        &self.placeholder_delimiter
    }

    /// Whether the grammar was compiled for the delimiters in `settings`
    pub fn matches_settings(&self, settings: &Settings) -> bool {
        self.placeholder_delimiter == settings.placeholder_delimiter
            && self.namespace_delimiter == settings.namespace_delimiter
            && self.argument_delimiter == settings.argument_delimiter
    }

    /// Split a template into tokens
    pub fn tokenize<'t>(&self, template: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                tokens.push(Token::Text(&template[last..whole.start()]));
            }
            tokens.push(self.classify(&caps, whole.as_str(), whole.start()));
            last = whole.end();
        }
        if last < template.len() {
            tokens.push(Token::Text(&template[last..]));
        }
        tokens
    }

    fn classify<'t>(&self, caps: &Captures<'t>, raw: &'t str, position: usize) -> Token<'t> {
        if caps.name("escaped").is_some() {
            return Token::Escaped { raw };
        }
        let (body, braced) = match (caps.name("braced"), caps.name("named")) {
            (Some(body), _) => (body.as_str(), true),
            (None, Some(body)) => (body.as_str(), false),
            (None, None) => return Token::Invalid { raw, position },
        };
        Token::Placeholder(Placeholder {
            raw,
            body,
            braced,
            kind: self.parse_body(body),
        })
    }

    /// Parse `name` or `name(arg|arg|...)`
    fn parse_body<'t>(&self, body: &'t str) -> PlaceholderKind<'t> {
        let Some((name, rest)) = body.split_once('(') else {
            return PlaceholderKind::Named(body);
        };
        // The grammar guarantees a single trailing ')'.
        let inner = rest.strip_suffix(')').unwrap_or(rest);
        PlaceholderKind::Call {
            name,
            args: inner.split(self.argument_delimiter.as_str()).collect(),
        }
    }

    /// The message key a placeholder refers to, when it is a static reference
    pub fn static_reference<'t>(&self, placeholder: &Placeholder<'t>) -> Option<StaticReference<'t>> {
        let PlaceholderKind::Named(name) = placeholder.kind else {
            return None;
        };
        if let Some(stripped) = strip_leading(name, &self.namespace_delimiter) {
            return Some(StaticReference::Relative(stripped));
        }
        (placeholder.braced && name.contains(self.namespace_delimiter.as_str()))
            .then_some(StaticReference::Absolute(name))
    }

    /// Candidate keys for a static reference found in `key`, in lookup order
    pub fn reference_candidates(&self, key: &str, reference: StaticReference<'_>) -> Vec<String> {
        match reference {
            StaticReference::Absolute(target) => vec![target.to_string()],
            StaticReference::Relative(target) => {
                let path: Vec<&str> = key.split(self.namespace_delimiter.as_str()).collect();
                (0..path.len())
                    .rev()
                    .map(|depth| {
                        lexis_common::join_key(
                            &path[..depth].join(&self.namespace_delimiter),
                            target,
                            &self.namespace_delimiter,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Fail on the first invalid delimiter in `template`
    pub fn check(&self, template: &str) -> I18nResult<()> {
        match self
            .tokenize(template)
            .into_iter()
            .find(|token| matches!(token, Token::Invalid { .. }))
        {
            Some(Token::Invalid { position, .. }) => Err(I18nError::InvalidTemplate {
                template: template.to_string(),
                position,
            }),
            _ => Ok(()),
        }
    }
}
