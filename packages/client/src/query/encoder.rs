//! Mapping-to-query-string encoder

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::dialect::EncodingDialect;

/// Index markers (`[0]`, `[]`) in encoded or literal form
static INDEX_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:%5B|\[)[0-9]*(?:%5D|\])")
        .unwrap_or_else(|e| panic!("index marker pattern failed to compile: {e}"))
});

/// Query-string encoder with a configurable dialect.
///
/// Nested containers use bracket notation: key `a` holding `["x", "y"]`
/// renders as `a[0]=x&a[1]=y`, with the brackets percent-encoded as part of
/// the key. Top-level sequence indices are prefixed with `numeric_prefix`.
/// `null` entries and empty nested containers produce nothing; booleans
/// render as `1` and `0`.
///
/// # Examples
/// ```
/// use fetchkit_client::query::QueryEncoder;
/// use serde_json::json;
///
/// let query = QueryEncoder::new().encode(&json!({"page": 1, "tags": ["a", "b"]}));
/// assert_eq!(query, "page=1&tags%5B0%5D=a&tags%5B1%5D=b");
///
/// let flat = QueryEncoder::new()
///     .suppress_brackets(true)
///     .encode(&json!({"tags": ["a", "b"]}));
/// assert_eq!(flat, "tags=a&tags=b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEncoder {
    numeric_prefix: String,
    separator: String,
    dialect: EncodingDialect,
    suppress_brackets: bool,
}

impl Default for QueryEncoder {
    fn default() -> Self {
        Self {
            numeric_prefix: String::new(),
            separator: "&".to_string(),
            dialect: EncodingDialect::default(),
            suppress_brackets: false,
        }
    }
}

impl QueryEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to top-level sequence indices
    #[must_use]
    pub fn numeric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.numeric_prefix = prefix.into();
        self
    }

    /// Separator placed between `key=value` pairs
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn dialect(mut self, dialect: EncodingDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Strip index markers from keys after encoding
    #[must_use]
    pub fn suppress_brackets(mut self, suppress: bool) -> Self {
        self.suppress_brackets = suppress;
        self
    }

    /// Encode `data` into a query string.
    ///
    /// Only objects and arrays carry pairs; any other value encodes to the
    /// empty string.
    #[must_use]
    pub fn encode(&self, data: &Value) -> String {
        let mut pairs = Vec::new();

        match data {
            Value::Object(map) => {
                for (key, value) in map {
                    self.push_pairs(&mut pairs, key.clone(), value);
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    self.push_pairs(&mut pairs, format!("{}{index}", self.numeric_prefix), value);
                }
            }
            _ => return String::new(),
        }

        pairs
            .iter()
            .map(|(key, value)| {
                if self.suppress_brackets {
                    format!("{}={value}", INDEX_MARKER.replace_all(key, ""))
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Collect encoded `(key, value)` pairs; index markers are stripped from
    /// keys only once every pair is encoded, so values are never touched.
    fn push_pairs(&self, pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (child, nested) in map {
                    self.push_pairs(pairs, format!("{key}[{child}]"), nested);
                }
            }
            Value::Array(items) => {
                for (index, nested) in items.iter().enumerate() {
                    self.push_pairs(pairs, format!("{key}[{index}]"), nested);
                }
            }
            scalar => {
                let text = scalar_text(scalar);
                pairs.push((
                    self.dialect.escape(&key).into_owned(),
                    self.dialect.escape(&text).into_owned(),
                ));
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        other => other.to_string(),
    }
}

/// Encode `data` with explicit dialect parameters.
///
/// Shorthand for building a [`QueryEncoder`] with the same settings.
#[must_use]
pub fn encode(
    data: &Value,
    numeric_prefix: &str,
    separator: &str,
    dialect: EncodingDialect,
    suppress_brackets: bool,
) -> String {
    QueryEncoder::new()
        .numeric_prefix(numeric_prefix)
        .separator(separator)
        .dialect(dialect)
        .suppress_brackets(suppress_brackets)
        .encode(data)
}
