//! Key and namespace helpers.

/// Splits a key into its namespace segments.
pub fn split_key<'a>(key: &'a str, delimiter: &str) -> Vec<&'a str> {
    key.split(delimiter).collect()
}

/// Joins a namespace and a key, skipping the delimiter for the root namespace.
pub fn join_key(namespace: &str, key: &str, delimiter: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{namespace}{delimiter}{key}")
    }
}

/// Namespace part of a key: every segment except the last.
pub fn namespace_of<'a>(key: &'a str, delimiter: &str) -> &'a str {
    key.rsplit_once(delimiter).map_or("", |(namespace, _)| namespace)
}

/// Strips every leading repetition of `delimiter` from `token`.
///
/// Returns `None` when the token does not start with the delimiter.
pub fn strip_leading<'a>(token: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() || !token.starts_with(delimiter) {
        return None;
    }
    Some(token.trim_start_matches(delimiter))
}
