//! Transport option model
//!
//! Option keys are opaque tokens owned by the transport. The well-known keys
//! below cover what the request state and executor derive; transports are
//! free to accept further keys created with [`OptionKey::custom`].

use std::borrow::Cow;
use std::fmt;

use hashbrown::HashMap;
use serde_json::Value;

/// Opaque, comparable transport option key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionKey(Cow<'static, str>);

impl OptionKey {
    /// Request method override
    pub const METHOD: OptionKey = OptionKey(Cow::Borrowed("method"));
    /// Target URL, including any appended query string
    pub const URL: OptionKey = OptionKey(Cow::Borrowed("url"));
    /// Serialized `Key: value` header lines
    pub const HTTP_HEADER: OptionKey = OptionKey(Cow::Borrowed("http_header"));
    /// Serialized cookie string
    pub const COOKIE: OptionKey = OptionKey(Cow::Borrowed("cookie"));
    /// Send-body flag
    pub const POST: OptionKey = OptionKey(Cow::Borrowed("post"));
    /// Body content
    pub const POST_FIELDS: OptionKey = OptionKey(Cow::Borrowed("post_fields"));
    /// Buffer and return the body instead of streaming it
    pub const RETURN_TRANSFER: OptionKey = OptionKey(Cow::Borrowed("return_transfer"));
    /// Whole-request timeout in milliseconds
    pub const TIMEOUT: OptionKey = OptionKey(Cow::Borrowed("timeout_ms"));
    /// Connect timeout in milliseconds
    pub const CONNECT_TIMEOUT: OptionKey = OptionKey(Cow::Borrowed("connect_timeout_ms"));
    pub const USER_AGENT: OptionKey = OptionKey(Cow::Borrowed("user_agent"));
    pub const REFERER: OptionKey = OptionKey(Cow::Borrowed("referer"));
    /// `user:password` credentials for Basic authentication
    pub const USER_PWD: OptionKey = OptionKey(Cow::Borrowed("user_pwd"));
    pub const SSL_VERIFY_PEER: OptionKey = OptionKey(Cow::Borrowed("ssl_verify_peer"));

    /// Transport-specific key outside the well-known set
    #[must_use]
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        OptionKey(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
    /// Structured mapping handed to the transport unchanged
    Fields(Value),
}

impl OptionValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(flag) => Some(*flag),
            OptionValue::Int(value) => Some(*value != 0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            OptionValue::Bool(flag) => Some(i64::from(*flag)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_fields(&self) -> Option<&Value> {
        match self {
            OptionValue::Fields(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Bool(flag)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(items: Vec<&str>) -> Self {
        OptionValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Fields(value)
    }
}

/// Unordered option mapping with last-write-wins semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: HashMap<OptionKey, OptionValue>,
}

impl OptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an option, returning the previous value
    pub fn insert(&mut self, key: OptionKey, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.entries.insert(key, value.into())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: OptionKey, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &OptionKey) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &OptionKey) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &OptionKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &OptionValue)> {
        self.entries.iter()
    }

    /// Layer `other` on top of `self`; `other` wins on key collision.
    pub fn overlay(&mut self, other: OptionSet) {
        self.entries.extend(other.entries);
    }

    /// Text value for `key`, if present and textual
    #[must_use]
    pub fn text(&self, key: &OptionKey) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_text)
    }

    /// Boolean value for `key`; absent keys read as `false`
    #[must_use]
    pub fn flag(&self, key: &OptionKey) -> bool {
        self.get(key).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn int(&self, key: &OptionKey) -> Option<i64> {
        self.get(key).and_then(OptionValue::as_int)
    }

    #[must_use]
    pub fn list(&self, key: &OptionKey) -> Option<&[String]> {
        self.get(key).and_then(OptionValue::as_list)
    }
}

impl FromIterator<(OptionKey, OptionValue)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (OptionKey, OptionValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(OptionKey, OptionValue)> for OptionSet {
    fn extend<I: IntoIterator<Item = (OptionKey, OptionValue)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for OptionSet {
    type Item = (OptionKey, OptionValue);
    type IntoIter = hashbrown::hash_map::IntoIter<OptionKey, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
