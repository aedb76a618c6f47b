//! Conversion of parsed resource trees into namespaced translation values
//!
//! Nested mappings become key prefixes joined with the namespace delimiter.
//! A mapping with at least two plural category keys is a plural value, and a
//! list is a variant list.

use crate::error::{LoadError, LoadResult};
use lexis_common::{join_key, PluralCategory, PluralForms, TranslationValue, Variant};
use serde_json::{Map, Value};
use tracing::warn;

/// Flatten `data` into `(key, value)` pairs under `namespace`
pub fn flatten(
    data: Map<String, Value>,
    namespace: &str,
    delimiter: &str,
) -> LoadResult<Vec<(String, TranslationValue)>> {
    let mut entries = Vec::new();
    flatten_into(data, namespace, delimiter, &mut entries)?;
    Ok(entries)
}

fn flatten_into(
    data: Map<String, Value>,
    namespace: &str,
    delimiter: &str,
    entries: &mut Vec<(String, TranslationValue)>,
) -> LoadResult<()> {
    for (key, value) in data {
        let full_key = join_key(namespace, &key, delimiter);
        match value {
            Value::Object(map) if !is_plural(&map) => {
                flatten_into(map, &full_key, delimiter, entries)?;
            }
            Value::Object(map) => {
                entries.push((full_key.clone(), plural_forms(&full_key, map)?.into()));
            }
            Value::Array(items) => {
                let variants = items
                    .into_iter()
                    .map(|item| variant(&full_key, item))
                    .collect::<LoadResult<Vec<_>>>()?;
                entries.push((full_key, variants.into()));
            }
            Value::Null => warn!("Skipping empty value for key '{}'", full_key),
            scalar => {
                let text = scalar_text(&full_key, scalar)?;
                entries.push((full_key, text.into()));
            }
        }
    }
    Ok(())
}

fn is_plural(map: &Map<String, Value>) -> bool {
    PluralCategory::ALL
        .iter()
        .filter(|category| map.contains_key(category.as_str()))
        .count()
        >= 2
}

fn plural_forms(key: &str, map: Map<String, Value>) -> LoadResult<PluralForms> {
    let mut forms = PluralForms::new();
    for (name, value) in map {
        match name.parse::<PluralCategory>() {
            Ok(category) => forms.insert(category, scalar_text(key, value)?),
            Err(_) => warn!("Ignoring non-plural entry '{}' in plural key '{}'", name, key),
        }
    }
    Ok(forms)
}

fn variant(key: &str, item: Value) -> LoadResult<Variant> {
    match item {
        Value::Object(map) => Ok(Variant::Plural(plural_forms(key, map)?)),
        other => Ok(Variant::Text(scalar_text(key, other)?)),
    }
}

fn scalar_text(key: &str, value: Value) -> LoadResult<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(LoadError::InvalidData {
            path: key.to_string(),
            message: format!("unsupported value {other}"),
        }),
    }
}
