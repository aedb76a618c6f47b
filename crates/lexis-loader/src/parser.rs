//! Resource parsers, selected by file extension

use crate::error::{LoadError, LoadResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Turns decoded file content into a data tree
pub trait ResourceParser: Send + Sync {
    /// Parse decoded file content
    fn parse(&self, content: &str) -> LoadResult<Value>;
}

/// Parses `.json` files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ResourceParser for JsonParser {
    fn parse(&self, content: &str) -> LoadResult<Value> {
        serde_json::from_str(content).map_err(|e| LoadError::Json(e.to_string()))
    }
}

/// Parses `.yml` and `.yaml` files
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl ResourceParser for YamlParser {
    fn parse(&self, content: &str) -> LoadResult<Value> {
        serde_yaml::from_str(content).map_err(|e| LoadError::Yaml(e.to_string()))
    }
}

/// Extension to parser mapping
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn ResourceParser>>,
}

impl ParserRegistry {
    /// A registry with no parsers
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register `parser` for each extension, replacing earlier registrations
    pub fn register<P>(&mut self, parser: P, extensions: &[&str])
    where
        P: ResourceParser + 'static,
    {
        let parser: Arc<dyn ResourceParser> = Arc::new(parser);
        for extension in extensions {
            self.parsers
                .insert((*extension).to_string(), Arc::clone(&parser));
        }
    }

    /// Parser for `extension`
    pub fn get(&self, extension: &str) -> LoadResult<&dyn ResourceParser> {
        self.parsers
            .get(extension)
            .map(AsRef::as_ref)
            .ok_or_else(|| LoadError::NoParser(extension.to_string()))
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(JsonParser, &["json"]);
        registry.register(YamlParser, &["yml", "yaml"]);
        registry
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let registry = ParserRegistry::default();
        assert_eq!(registry.extensions(), vec!["json", "yaml", "yml"]);
        assert_eq!(
            registry.get("py").err().map(|e| e.to_string()),
            Some("no loader available for extension py".to_string())
        );
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let registry = ParserRegistry::default();
        let json = registry
            .get("json")
            .unwrap()
            .parse(r#"{"en": {"hi": "Hello", "n": 3}}"#)
            .unwrap();
        let yaml = registry
            .get("yml")
            .unwrap()
            .parse("en:\n  hi: Hello\n  n: 3\n")
            .unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_syntax_errors() {
        let json = JsonParser.parse("{").unwrap_err().to_string();
        assert!(json.starts_with("invalid JSON: "), "{json}");
        let yaml = YamlParser.parse("a: [").unwrap_err().to_string();
        assert!(yaml.starts_with("invalid YAML: "), "{yaml}");
    }

    #[test]
    fn test_custom_parser() {
        struct Lines;
        impl ResourceParser for Lines {
            fn parse(&self, content: &str) -> LoadResult<Value> {
                let map = content
                    .lines()
                    .filter_map(|line| line.split_once('='))
                    .map(|(k, v)| (k.trim().to_string(), Value::from(v.trim())))
                    .collect();
                Ok(Value::Object(map))
            }
        }

        let mut registry = ParserRegistry::empty();
        registry.register(Lines, &["properties"]);
        let value = registry.get("properties").unwrap().parse("a = 1\nb = two").unwrap();
        assert_eq!(value["b"], "two");
    }
}
