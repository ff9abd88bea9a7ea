//! Fetchkit Public API
//!
//! Entry points that hand out preconfigured request executors, plus header
//! and authentication helpers for their request state.
//!
//! ```no_run
//! use fetchkit::{AuthExt, Http};
//! use serde_json::json;
//!
//! let mut executor = Http::json();
//! executor.state_mut().bearer_auth("token");
//!
//! let response = executor
//!     .acquire(Some("https://api.example.com/users"), None)?
//!     .post(json!({"email": "a@b.c"}))?;
//! println!("{}", response.status_code);
//! # Ok::<(), fetchkit::HttpError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::Arc;

pub mod builder;

pub use builder::{
    AcceptValue, AuthExt, ContentType, HeaderExt, form_executor, header, json_executor,
};

// Re-export important types from the client package
pub use fetchkit_client::{
    EncodingDialect, ExecutorConfig, HandleMode, HttpError, HyperTransport, InfoKey, InfoValue,
    OptionKey, OptionSet, OptionValue, Phase, RequestData, RequestExecutor, RequestState,
    Response, Transport, TransportErrorPolicy, global_transport,
};

/// Main entry point providing static executor constructors
#[derive(Debug, Clone, Copy)]
pub struct Http;

impl Http {
    /// JSON executor on the shared transport
    ///
    /// Shorthand for [`json_executor`] with [`global_transport`].
    #[must_use]
    pub fn json() -> RequestExecutor {
        json_executor(global_transport())
    }

    /// Form-urlencoded executor on the shared transport
    ///
    /// # Errors
    ///
    /// See [`form_executor`].
    pub fn form() -> Result<RequestExecutor, HttpError> {
        form_executor(global_transport())
    }

    /// Executor with the default configuration on a caller-supplied transport
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> RequestExecutor {
        RequestExecutor::new(transport)
    }
}

/// Create a JSON executor on the shared transport
///
/// Shorthand for `Http::json()`
#[must_use]
pub fn json() -> RequestExecutor {
    Http::json()
}

/// Create a form-urlencoded executor on the shared transport
///
/// # Errors
///
/// See [`form_executor`].
pub fn form() -> Result<RequestExecutor, HttpError> {
    Http::form()
}
