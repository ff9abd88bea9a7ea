//! Accumulated request configuration
//!
//! `RequestState` collects URL, headers, cookies, explicit transport options
//! and encoding policy during the configuration phase, and resolves them into
//! the final option set handed to the transport.

pub mod core;
pub mod headers;

pub use self::core::RequestState;
