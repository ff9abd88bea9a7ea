//! Captured response of one execution

use serde::de::DeserializeOwned;

use crate::error::{self, Result};
use crate::transport::{ResponseBody, codes};

/// Body, status and transport outcome of an execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub body: Option<ResponseBody>,
    pub status_code: u16,
    pub transport_error_code: i32,
    pub transport_error_message: String,
}

impl Response {
    /// Buffered body text, if the body was returned
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body.as_ref().and_then(ResponseBody::as_text)
    }

    /// True when the transport succeeded and the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.transport_error_code == codes::OK && (200..300).contains(&self.status_code)
    }

    /// Decode the buffered body as JSON
    ///
    /// # Errors
    ///
    /// Returns a decode error when no body was buffered or it is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let text = self
            .text()
            .ok_or_else(|| error::decode("response body was not buffered"))?;
        serde_json::from_str(text).map_err(error::decode)
    }
}
