//! Header helpers for `RequestState`
//!
//! Common headers such as Content-Type, Accept and Cache-Control, written
//! into the state's header map under their canonical names.

use fetchkit_client::RequestState;
use http::HeaderValue;

use crate::builder::core::ContentType;

/// Helper type for `accept` that can handle both strings and `ContentType` values
#[derive(Debug, Clone)]
pub enum AcceptValue {
    /// String representation of content type
    String(String),
    /// `ContentType` enum variant
    ContentType(ContentType),
}

impl AcceptValue {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AcceptValue::String(s) => s,
            AcceptValue::ContentType(ct) => ct.as_str(),
        }
    }
}

impl From<&str> for AcceptValue {
    fn from(s: &str) -> Self {
        AcceptValue::String(s.to_string())
    }
}

impl From<String> for AcceptValue {
    fn from(s: String) -> Self {
        AcceptValue::String(s)
    }
}

impl From<ContentType> for AcceptValue {
    fn from(ct: ContentType) -> Self {
        AcceptValue::ContentType(ct)
    }
}

/// Canonical header names used by the helpers.
///
/// Header keys are matched exactly, so helpers always write these spellings.
pub mod header {
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const USER_AGENT: &str = "User-Agent";

    /// Custom X-API-Key header for API authentication
    pub const X_API_KEY: &str = "X-API-Key";
}

/// Header shorthands on a request state.
///
/// Values that are not valid HTTP header values are skipped with a warning.
///
/// # Examples
/// ```
/// use fetchkit::{ContentType, HeaderExt, RequestState};
///
/// let mut state = RequestState::new();
/// state
///     .accept(ContentType::ApplicationJson)
///     .max_age(3600);
///
/// assert_eq!(state.header("Accept"), Some("application/json"));
/// assert_eq!(state.header("Cache-Control"), Some("max-age=3600"));
/// ```
pub trait HeaderExt {
    /// Set a header after validating its value
    fn checked_header(&mut self, name: &str, value: &str) -> &mut Self;

    /// Set the `Content-Type` header
    fn content_type(&mut self, content_type: ContentType) -> &mut Self {
        self.checked_header(header::CONTENT_TYPE, content_type.as_str())
    }

    /// Set the `Accept` header from a string or `ContentType`
    fn accept<T: Into<AcceptValue>>(&mut self, accept: T) -> &mut Self {
        let accept = accept.into();
        self.checked_header(header::ACCEPT, accept.as_str())
    }

    /// Set the `User-Agent` header
    fn user_agent(&mut self, user_agent: &str) -> &mut Self {
        self.checked_header(header::USER_AGENT, user_agent)
    }

    /// Set the `Cache-Control` header (e.g. "no-cache", "max-age=3600")
    fn cache_control(&mut self, value: &str) -> &mut Self {
        self.checked_header(header::CACHE_CONTROL, value)
    }

    /// Set a `max-age` cache control directive
    fn max_age(&mut self, seconds: u64) -> &mut Self {
        let value = format!("max-age={seconds}");
        self.cache_control(&value)
    }
}

impl HeaderExt for RequestState {
    fn checked_header(&mut self, name: &str, value: &str) -> &mut Self {
        if HeaderValue::from_str(value).is_err() {
            log::warn!("skipping invalid value for header {name}");
            return self;
        }
        self.add_header(name, Some(value))
    }
}
