//! Fetchkit builder API modules
//!
//! Entry-point constructors plus header and authentication extensions for
//! the request state held by an executor.

pub mod auth;
pub mod core;
pub mod headers;

pub use self::auth::AuthExt;
pub use self::core::*;
pub use self::headers::*;
