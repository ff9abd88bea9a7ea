//! Core `RequestState` structure, option layering and encoding policy

use std::time::Duration;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::options::{OptionKey, OptionSet, OptionValue};
use crate::query::{EncodingDialect, QueryEncoder};

/// Request configuration accumulated before execution.
///
/// Header and cookie keys are unique and keep insertion order. Explicit
/// options are layered under the derived header list and cookie string when
/// resolved, so live header state always wins over a stale explicit entry.
///
/// # Examples
/// ```
/// use fetchkit_client::{OptionKey, RequestState};
///
/// let mut state = RequestState::new();
/// state
///     .set_url("http://api.example.com/users")
///     .add_header("Accept", Some("application/json"))
///     .add_cookie("session", Some("abc"));
///
/// let options = state.resolve_options();
/// assert_eq!(options.list(&OptionKey::HTTP_HEADER), Some(&["Accept: application/json".to_string()][..]));
/// assert_eq!(options.text(&OptionKey::COOKIE), Some("session=abc"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestState {
    pub(crate) url: Option<String>,
    pub(crate) headers: IndexMap<String, String>,
    pub(crate) cookies: IndexMap<String, String>,
    pub(crate) options: OptionSet,
    pub(crate) url_encoding: EncodingDialect,
    pub(crate) body_encoding: EncodingDialect,
    pub(crate) suppress_array_brackets: bool,
    pub(crate) return_raw_body: bool,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            url: None,
            headers: IndexMap::new(),
            cookies: IndexMap::new(),
            options: OptionSet::new(),
            url_encoding: EncodingDialect::default(),
            body_encoding: EncodingDialect::default(),
            suppress_array_brackets: false,
            return_raw_body: true,
        }
    }
}

impl RequestState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored target URL
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Set an explicit transport option; last write wins
    pub fn add_option(&mut self, key: OptionKey, value: impl Into<OptionValue>) -> &mut Self {
        self.options.insert(key, value);
        self
    }

    /// Replace every explicit option with `options`.
    ///
    /// Header and cookie state is untouched; the derived entries are
    /// recomputed on the next resolution.
    pub fn set_options(&mut self, options: OptionSet) -> &mut Self {
        self.options.clear();
        self.options.overlay(options);
        self
    }

    /// Explicit options only, without derived entries
    #[must_use]
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Explicit options overlaid with the derived header list and cookie string
    #[must_use]
    pub fn resolve_options(&self) -> OptionSet {
        let mut resolved = self.options.clone();
        resolved.overlay(self.derived_options());
        resolved
    }

    fn derived_options(&self) -> OptionSet {
        let mut derived = OptionSet::new();

        if !self.headers.is_empty() {
            let lines: Vec<String> = self
                .headers
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect();
            derived.insert(OptionKey::HTTP_HEADER, lines);
        }

        if !self.cookies.is_empty() {
            let cookies: Map<String, Value> = self
                .cookies
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            let encoded = QueryEncoder::new()
                .separator("; ")
                .encode(&Value::Object(cookies));
            derived.insert(OptionKey::COOKIE, encoded);
        }

        derived
    }

    /// Dialect used for URL query strings
    pub fn set_url_encoding(&mut self, dialect: EncodingDialect) -> &mut Self {
        self.url_encoding = dialect;
        self
    }

    /// Dialect used for body payload strings
    pub fn set_body_encoding(&mut self, dialect: EncodingDialect) -> &mut Self {
        self.body_encoding = dialect;
        self
    }

    #[must_use]
    pub fn url_encoding(&self) -> EncodingDialect {
        self.url_encoding
    }

    #[must_use]
    pub fn body_encoding(&self) -> EncodingDialect {
        self.body_encoding
    }

    /// Strip `[0]` / `[]` index markers from encoded sequence keys
    pub fn set_suppress_array_brackets(&mut self, suppress: bool) -> &mut Self {
        self.suppress_array_brackets = suppress;
        self
    }

    #[must_use]
    pub fn suppress_array_brackets(&self) -> bool {
        self.suppress_array_brackets
    }

    /// Buffer and return the response body (`true`) or stream it (`false`)
    pub fn set_return_raw_body(&mut self, enable: bool) -> &mut Self {
        self.return_raw_body = enable;
        self
    }

    #[must_use]
    pub fn return_raw_body(&self) -> bool {
        self.return_raw_body
    }

    /// Encode `data` as a URL query string
    #[must_use]
    pub fn build_url_query(&self, data: &Value) -> String {
        self.encoder(self.url_encoding).encode(data)
    }

    /// Encode `data` as a body payload string
    #[must_use]
    pub fn build_payload_query(&self, data: &Value) -> String {
        self.encoder(self.body_encoding).encode(data)
    }

    fn encoder(&self, dialect: EncodingDialect) -> QueryEncoder {
        QueryEncoder::new()
            .dialect(dialect)
            .suppress_brackets(self.suppress_array_brackets)
    }

    /// Whole-request timeout
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.add_option(OptionKey::TIMEOUT, millis(timeout))
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.add_option(OptionKey::CONNECT_TIMEOUT, millis(timeout))
    }

    pub fn set_user_agent(&mut self, user_agent: &str) -> &mut Self {
        self.add_option(OptionKey::USER_AGENT, user_agent)
    }

    pub fn set_referer(&mut self, referer: &str) -> &mut Self {
        self.add_option(OptionKey::REFERER, referer)
    }

    /// Credentials for Basic authentication, applied by the transport
    pub fn set_basic_auth(&mut self, user: &str, password: &str) -> &mut Self {
        self.add_option(OptionKey::USER_PWD, format!("{user}:{password}"))
    }

    pub fn set_verify_peer(&mut self, verify: bool) -> &mut Self {
        self.add_option(OptionKey::SSL_VERIFY_PEER, verify)
    }

    /// Clear every field back to its construction default: URL, headers,
    /// cookies, explicit options, both dialects, the bracket flag and the
    /// raw-body flag.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
