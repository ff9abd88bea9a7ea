//! Executor construction for the JSON and form entry points

use std::sync::Arc;

use fetchkit_client::executor::prepare_form_payload;
use fetchkit_client::error::Result;
use fetchkit_client::{ExecutorConfig, RequestExecutor, Transport};

use crate::builder::headers::HeaderExt;

/// Content type enumeration for the entry points and header helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
    /// text/html content type
    TextHtml,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
        }
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s {
            "application/x-www-form-urlencoded" => ContentType::ApplicationFormUrlEncoded,
            "application/octet-stream" => ContentType::ApplicationOctetStream,
            "text/plain" => ContentType::TextPlain,
            "text/html" => ContentType::TextHtml,
            // application/json and anything unrecognised
            _ => ContentType::ApplicationJson,
        }
    }
}

/// Executor whose verbs send JSON bodies with a matching `Content-Type`
#[must_use]
pub fn json_executor(transport: Arc<dyn Transport>) -> RequestExecutor {
    let mut executor = RequestExecutor::new(transport);
    executor.state_mut().content_type(ContentType::ApplicationJson);
    log::debug!("created JSON executor");
    executor
}

/// Executor whose verbs send `application/x-www-form-urlencoded` bodies.
///
/// Field maps are rendered with the state's body dialect, so nested data
/// produces bracketed keys exactly as it would in a query string.
///
/// # Errors
///
/// Returns a builder error if the form configuration fails validation.
pub fn form_executor(transport: Arc<dyn Transport>) -> Result<RequestExecutor> {
    let config = ExecutorConfig::default().encode_as_json(false);
    let mut executor =
        RequestExecutor::with_config(transport, config)?.with_payload_preparer(prepare_form_payload);
    executor
        .state_mut()
        .content_type(ContentType::ApplicationFormUrlEncoded);
    log::debug!("created form executor");
    Ok(executor)
}
