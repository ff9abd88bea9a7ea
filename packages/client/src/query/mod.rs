//! Query-string encoding
//!
//! Renders nested mappings and sequences into delimited, percent-encoded
//! strings under a configurable dialect. Used for URL query strings, form
//! bodies and the serialized cookie option.

pub mod dialect;
pub mod encoder;

pub use dialect::EncodingDialect;
pub use encoder::{QueryEncoder, encode};
