//! # Fetchkit Client
//!
//! Stateful HTTP request executor layered over a pluggable transport.
//!
//! A [`RequestState`] accumulates headers, cookies, options and encoding
//! preferences across requests. A [`RequestExecutor`] resolves that state
//! into transport options, opens a handle, applies the verb and payload,
//! and captures the [`Response`] together with the transport's metadata.
//!
//! ## Features
//!
//! - **Nested query encoding** with RFC 1738 / RFC 3986 dialects and optional
//!   array-index suppression
//! - **Explicit handle lifecycle**: acquire, execute, inspect
//! - **Swappable transport** behind the [`Transport`] trait, with a hyper
//!   backed default
//! - **JSON or form payloads** through a replaceable codec and preparer
//!
//! ## Usage
//!
//! ```no_run
//! use fetchkit_client::{RequestExecutor, global_transport};
//! use serde_json::json;
//!
//! let mut executor = RequestExecutor::new(global_transport());
//! executor
//!     .state_mut()
//!     .add_header("Accept", Some("application/json"))
//!     .add_cookie("session", Some("abc"));
//!
//! let response = executor
//!     .acquire(Some("http://localhost:8080/users"), None)?
//!     .post(json!({"name": "Ada"}))?;
//! println!("{} {:?}", response.status_code, response.text());
//! # Ok::<(), fetchkit_client::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

use std::sync::{Arc, OnceLock};

pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod options;
pub mod query;
pub mod state;
pub mod transport;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;

/// Process-wide hyper transport, shared by executors that do not bring their own
static GLOBAL_TRANSPORT: OnceLock<Arc<HyperTransport>> = OnceLock::new();

/// Get the shared hyper transport.
///
/// The transport is stateless apart from its lazily built TLS configuration,
/// so a single instance serves every executor.
#[must_use]
pub fn global_transport() -> Arc<dyn Transport> {
    GLOBAL_TRANSPORT
        .get_or_init(|| Arc::new(HyperTransport::new()))
        .clone()
}
