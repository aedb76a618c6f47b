//! Resource filename templates such as `{namespace}.{locale}.{format}`.
//!
//! A template is made of literal text and the fields `namespace`, `locale`
//! and `format`. Literal braces are written doubled (`{{`, `}}`). Each field
//! matches a run of word characters when a filename is parsed.

use lexis_common::{LexisError, Result};
use regex::Regex;
use std::fmt;

/// Fields a filename template may reference.
pub const FILENAME_FIELDS: [&str; 3] = ["namespace", "locale", "format"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(&'static str),
}

/// A compiled filename template.
#[derive(Clone)]
pub struct FilenameFormat {
    template: String,
    pieces: Vec<Piece>,
    pattern: Regex,
}

/// Field values captured from a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameMatch {
    /// Captured `{namespace}`.
    pub namespace: Option<String>,
    /// Captured `{locale}`.
    pub locale: Option<String>,
    /// Captured `{format}`.
    pub format: Option<String>,
}

impl FilenameFormat {
    /// Parses and compiles a filename template.
    pub fn compile(template: &str) -> Result<Self> {
        let pieces = parse_template(template)?;

        let mut pattern = String::from("^");
        let mut seen: Vec<&str> = Vec::new();
        for piece in &pieces {
            match piece {
                Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
                Piece::Field(name) if seen.contains(name) => pattern.push_str(r"\w+"),
                Piece::Field(name) => {
                    pattern.push_str(&format!(r"(?P<{name}>\w+)"));
                    seen.push(*name);
                }
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern)
            .map_err(|e| LexisError::InvalidFormat(format!("filename format {template:?}: {e}")))?;

        Ok(Self {
            template: template.to_string(),
            pieces,
            pattern,
        })
    }

    /// The source template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template references `{namespace}`.
    #[must_use]
    pub fn has_namespace(&self) -> bool {
        self.has_field("namespace")
    }

    /// Whether the template references `{locale}`.
    #[must_use]
    pub fn has_locale(&self) -> bool {
        self.has_field("locale")
    }

    /// Whether the template references `{format}`.
    #[must_use]
    pub fn has_format(&self) -> bool {
        self.has_field("format")
    }

    fn has_field(&self, field: &str) -> bool {
        self.pieces.iter().any(|p| matches!(p, Piece::Field(name) if *name == field))
    }

    /// Renders a filename.
    #[must_use]
    pub fn render(&self, namespace: &str, locale: &str, format: &str) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => text.as_str(),
                Piece::Field("namespace") => namespace,
                Piece::Field("locale") => locale,
                Piece::Field(_) => format,
            })
            .collect()
    }

    /// Matches a whole filename against the template.
    #[must_use]
    pub fn captures(&self, filename: &str) -> Option<FilenameMatch> {
        let caps = self.pattern.captures(filename)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Some(FilenameMatch {
            namespace: field("namespace"),
            locale: field("locale"),
            format: field("format"),
        })
    }
}

impl fmt::Debug for FilenameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilenameFormat")
            .field("template", &self.template)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl PartialEq for FilenameFormat {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

fn parse_template(template: &str) -> Result<Vec<Piece>> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => {
                            return Err(LexisError::InvalidFormat(format!(
                                "unclosed field in filename format {template:?}"
                            )))
                        }
                    }
                }
                if field.contains('!') || field.contains(':') {
                    return Err(LexisError::InvalidFormat(
                        "Can't apply format spec or conversion in filename format".to_string(),
                    ));
                }
                let name = FILENAME_FIELDS
                    .into_iter()
                    .find(|known| *known == field)
                    .ok_or_else(|| {
                        LexisError::InvalidFormat(format!(
                            "Unknown placeholder in filename format: '{field}'"
                        ))
                    })?;
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Field(name));
            }
            '}' => {
                return Err(LexisError::InvalidFormat(format!(
                    "single '}}' in filename format {template:?}"
                )))
            }
            c => literal.push(c),
        }
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}
