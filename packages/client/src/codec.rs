//! JSON codec used for request bodies

use std::fmt;

use serde_json::Value;

use crate::error::{self, Result};

/// Encodes request payloads as JSON text
pub trait JsonCodec: Send + Sync + fmt::Debug {
    /// Serialize `value` to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a codec error when `value` cannot be serialized.
    fn encode(&self, value: &Value) -> Result<String>;
}

/// `serde_json`-backed codec
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<String> {
        serde_json::to_string(value).map_err(error::codec)
    }
}
