//! Request data and payload preparation strategies

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::codec::JsonCodec;
use crate::error::{self, Result};
use crate::options::OptionValue;
use crate::state::RequestState;

/// Data handed to `execute`: a structured mapping or an already-encoded string
#[derive(Debug, Clone, PartialEq)]
pub enum RequestData {
    Fields(Value),
    Raw(String),
}

impl RequestData {
    /// No data; leaves the URL and body untouched
    #[must_use]
    pub fn empty() -> Self {
        RequestData::Fields(Value::Null)
    }

    /// Reflect any serializable value into request fields
    ///
    /// # Errors
    ///
    /// Returns a codec error when `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(RequestData::Fields)
            .map_err(error::codec)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RequestData::Fields(Value::Null) => true,
            RequestData::Fields(Value::Object(map)) => map.is_empty(),
            RequestData::Fields(Value::Array(items)) => items.is_empty(),
            RequestData::Fields(Value::String(text)) | RequestData::Raw(text) => text.is_empty(),
            RequestData::Fields(_) => false,
        }
    }

    /// Render as a URL query string using the state's URL dialect
    #[must_use]
    pub fn to_query(&self, state: &RequestState) -> String {
        match self {
            RequestData::Fields(Value::String(text)) | RequestData::Raw(text) => text.clone(),
            RequestData::Fields(fields) => state.build_url_query(fields),
        }
    }
}

impl Default for RequestData {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for RequestData {
    fn from(value: Value) -> Self {
        RequestData::Fields(value)
    }
}

impl From<&str> for RequestData {
    fn from(text: &str) -> Self {
        RequestData::Raw(text.to_string())
    }
}

impl From<String> for RequestData {
    fn from(text: String) -> Self {
        RequestData::Raw(text)
    }
}

/// Inputs available to a payload preparer
#[derive(Debug, Clone, Copy)]
pub struct PayloadContext<'a> {
    pub state: &'a RequestState,
    pub codec: &'a dyn JsonCodec,
    pub encode_as_json: bool,
}

/// Turns request data into the body option value
pub type PayloadPreparer =
    Arc<dyn Fn(&PayloadContext<'_>, &RequestData) -> Result<OptionValue> + Send + Sync>;

/// Default strategy: JSON text when requested, otherwise raw passthrough.
///
/// Mappings are handed to the transport unchanged; raw strings are never
/// re-encoded, even with `encode_as_json`.
///
/// # Errors
///
/// Returns a codec error when JSON encoding fails.
pub fn prepare_payload(ctx: &PayloadContext<'_>, data: &RequestData) -> Result<OptionValue> {
    match data {
        RequestData::Raw(text) | RequestData::Fields(Value::String(text)) => {
            Ok(OptionValue::Text(text.clone()))
        }
        RequestData::Fields(fields) if ctx.encode_as_json => {
            ctx.codec.encode(fields).map(OptionValue::Text)
        }
        RequestData::Fields(fields) => Ok(OptionValue::Fields(fields.clone())),
    }
}

/// Form strategy: mappings are rendered with the state's body dialect.
///
/// # Errors
///
/// Returns a codec error when JSON encoding fails.
pub fn prepare_form_payload(ctx: &PayloadContext<'_>, data: &RequestData) -> Result<OptionValue> {
    match data {
        RequestData::Fields(fields) if !ctx.encode_as_json && !fields.is_string() => {
            Ok(OptionValue::Text(ctx.state.build_payload_query(fields)))
        }
        _ => prepare_payload(ctx, data),
    }
}
