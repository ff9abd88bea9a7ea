//! Authentication methods for request state
//!
//! API keys, basic authentication and bearer tokens, all carried as
//! headers so they participate in the derived header list.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fetchkit_client::RequestState;

use crate::builder::headers::{HeaderExt, header};

/// Authentication header shorthands
pub trait AuthExt: HeaderExt {
    /// Set the `X-API-Key` header
    ///
    /// # Examples
    /// ```
    /// use fetchkit::{AuthExt, RequestState};
    ///
    /// let mut state = RequestState::new();
    /// state.api_key("your-api-key-here");
    /// assert_eq!(state.header("X-API-Key"), Some("your-api-key-here"));
    /// ```
    fn api_key(&mut self, key: &str) -> &mut Self {
        self.checked_header(header::X_API_KEY, key)
    }

    /// Set a `Basic` authorization header from a username and password.
    ///
    /// The credentials are base64 encoded here; use
    /// `RequestState::set_basic_auth` to hand them to the transport instead.
    fn basic_auth(&mut self, user: &str, password: &str) -> &mut Self {
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        self.checked_header(header::AUTHORIZATION, &format!("Basic {encoded}"))
    }

    /// Set a `Bearer` authorization header
    fn bearer_auth(&mut self, token: &str) -> &mut Self {
        self.checked_header(header::AUTHORIZATION, &format!("Bearer {token}"))
    }
}

impl AuthExt for RequestState {}
