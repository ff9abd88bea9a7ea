//! Core `RequestExecutor` state machine

use std::fmt;
use std::sync::Arc;

use http::Method;

use super::payload::{PayloadContext, PayloadPreparer, RequestData, prepare_payload};
use super::response::Response;
use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::config::{ExecutorConfig, HandleMode, TransportErrorPolicy, Validator};
use crate::error::{self, Result};
use crate::options::{OptionKey, OptionSet, OptionValue};
use crate::state::RequestState;
use crate::transport::{Handle, InfoKey, InfoValue, Transport, codes};

/// Executor lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No handle; `acquire` is required before executing
    Unacquired,
    /// Handle acquired with resolved options applied
    Ready,
    /// Response captured; the handle is retained for metadata queries
    Executed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unacquired => f.write_str("unacquired"),
            Phase::Ready => f.write_str("ready"),
            Phase::Executed => f.write_str("executed"),
        }
    }
}

enum Slot {
    Unacquired,
    Ready(Handle),
    Executed(Handle),
}

/// Materializes a `RequestState` into single transport exchanges.
///
/// Every execution needs a fresh [`acquire`](Self::acquire). In
/// [`HandleMode::SingleShot`] the handle is closed right after the exchange;
/// in [`HandleMode::Retained`] it stays available to [`info`](Self::info)
/// until the next `acquire`.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use fetchkit_client::{HyperTransport, RequestExecutor};
/// use serde_json::json;
///
/// let mut executor = RequestExecutor::new(Arc::new(HyperTransport::new()));
/// executor.state_mut().add_header("Accept", Some("application/json"));
///
/// let status = executor
///     .acquire(Some("http://api.example.com/users"), None)?
///     .get(json!({"page": 1}))?
///     .status_code;
/// # Ok::<(), fetchkit_client::Error>(())
/// ```
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn JsonCodec>,
    preparer: PayloadPreparer,
    pub(crate) config: ExecutorConfig,
    state: RequestState,
    slot: Slot,
    response: Option<Response>,
}

impl RequestExecutor {
    /// Create an executor with the default configuration
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            codec: Arc::new(SerdeJsonCodec),
            preparer: Arc::new(prepare_payload),
            config: ExecutorConfig::default(),
            state: RequestState::new(),
            slot: Slot::Unacquired,
            response: None,
        }
    }

    /// Create an executor with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a builder error if `config` fails validation.
    pub fn with_config(transport: Arc<dyn Transport>, config: ExecutorConfig) -> Result<Self> {
        config.validate()?;
        let mut executor = Self::new(transport);
        executor.config = config;
        Ok(executor)
    }

    /// Start from an existing request state
    #[must_use]
    pub fn with_state(mut self, state: RequestState) -> Self {
        self.state = state;
        self
    }

    /// Replace the JSON codec used for payloads
    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the payload preparation strategy
    #[must_use]
    pub fn with_payload_preparer<F>(mut self, preparer: F) -> Self
    where
        F: Fn(&PayloadContext<'_>, &RequestData) -> Result<OptionValue> + Send + Sync + 'static,
    {
        self.preparer = Arc::new(preparer);
        self
    }

    #[must_use]
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RequestState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.slot {
            Slot::Unacquired => Phase::Unacquired,
            Slot::Ready(_) => Phase::Ready,
            Slot::Executed(_) => Phase::Executed,
        }
    }

    /// True while a handle is live (Ready or retained after execution)
    #[must_use]
    pub fn is_acquired(&self) -> bool {
        !matches!(self.slot, Slot::Unacquired)
    }

    /// Resolve options and open a fresh transport handle.
    ///
    /// `url` overrides the stored URL. Options are layered as base options,
    /// then `extra`, then the state's resolved options; state wins on key
    /// collision. Any previous handle is closed and the previous response
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns a builder error when no URL is available, or the transport's
    /// error when it refuses to open a handle.
    pub fn acquire(&mut self, url: Option<&str>, extra: Option<OptionSet>) -> Result<&mut Self> {
        let target = url
            .map(str::to_string)
            .or_else(|| self.state.url().map(str::to_string))
            .ok_or_else(|| error::builder("no target URL: pass one to acquire or set it on the request state"))?;

        self.release();
        self.response = None;

        let mut options = self.config.base_options();
        options.insert(OptionKey::RETURN_TRANSFER, self.state.return_raw_body());
        if let Some(extra) = extra {
            options.overlay(extra);
        }
        options.overlay(self.state.resolve_options());
        options.insert(OptionKey::URL, target.as_str());

        tracing::trace!(options = ?options, "resolved transport options");

        let handle = self
            .transport
            .open(options)
            .map_err(|e| e.with_url(target.as_str()))?;
        tracing::debug!(
            handle = handle.id(),
            url = %target,
            transport = self.transport.name(),
            "acquired transport handle"
        );

        self.slot = Slot::Ready(handle);
        Ok(self)
    }

    /// Apply `verb` and `data` to the acquired handle and invoke the transport.
    ///
    /// With `payload`, non-empty data becomes the request body (JSON text
    /// when `encode_as_json`); otherwise it is appended to the URL as a query
    /// string. Empty data leaves both untouched. JSON-encoded mappings get a
    /// `Content-Type: application/json` header line unless one is already
    /// present. A failure reported without a message is described by its code.
    ///
    /// # Errors
    ///
    /// - lifecycle error when no handle is in the Ready phase
    /// - codec error when the payload cannot be encoded; the transport is not
    ///   invoked and the handle stays Ready
    /// - transport error for a non-zero transport code under
    ///   [`TransportErrorPolicy::Raise`]
    pub fn execute(
        &mut self,
        verb: Method,
        data: impl Into<RequestData>,
        payload: bool,
        encode_as_json: bool,
    ) -> Result<&Response> {
        let data = data.into();

        let mut handle = match std::mem::replace(&mut self.slot, Slot::Unacquired) {
            Slot::Ready(handle) => handle,
            other => {
                self.slot = other;
                return Err(error::must_acquire_first());
            }
        };

        handle.set_option(OptionKey::METHOD, verb.as_str());

        if !data.is_empty() {
            if payload {
                let ctx = PayloadContext {
                    state: &self.state,
                    codec: self.codec.as_ref(),
                    encode_as_json,
                };
                let body = match (self.preparer)(&ctx, &data) {
                    Ok(body) => body,
                    Err(e) => {
                        self.slot = Slot::Ready(handle);
                        return Err(e);
                    }
                };
                if encode_as_json && matches!(&data, RequestData::Fields(fields) if !fields.is_string()) {
                    ensure_json_content_type(&mut handle);
                }
                handle.set_option(OptionKey::POST, true);
                handle.set_option(OptionKey::POST_FIELDS, body);
            } else {
                let query = data.to_query(&self.state);
                if !query.is_empty() {
                    let url = handle
                        .option(&OptionKey::URL)
                        .and_then(OptionValue::as_text)
                        .unwrap_or_default();
                    let joined = append_query(url, &query);
                    handle.set_option(OptionKey::URL, joined);
                }
            }
        }

        let url = handle
            .option(&OptionKey::URL)
            .and_then(OptionValue::as_text)
            .unwrap_or_default()
            .to_string();
        tracing::debug!(
            handle = handle.id(),
            method = %verb,
            url = %url,
            transport = self.transport.name(),
            "executing request"
        );

        let reply = self.transport.invoke(&mut handle);
        let status_code = self
            .transport
            .metadata(&handle, InfoKey::ResponseCode)
            .and_then(|value| value.as_int())
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(0);

        match self.config.handle_mode {
            HandleMode::SingleShot => {
                self.transport.close(handle);
                self.slot = Slot::Unacquired;
            }
            HandleMode::Retained => self.slot = Slot::Executed(handle),
        }

        let error_message = if reply.error_code != codes::OK && reply.error_message.is_empty() {
            codes::describe(reply.error_code).to_string()
        } else {
            reply.error_message
        };
        let failure = (reply.error_code != codes::OK).then(|| (reply.error_code, error_message.clone()));
        let response = self.response.insert(Response {
            body: reply.body,
            status_code,
            transport_error_code: reply.error_code,
            transport_error_message: error_message,
        });

        if let Some((code, message)) = failure {
            tracing::warn!(code, message = %message, url = %url, "transport reported an error");
            if self.config.transport_errors == TransportErrorPolicy::Raise {
                return Err(error::transport(code, message).with_url(url));
            }
        }

        Ok(response)
    }

    /// Metadata recorded on the live handle
    ///
    /// # Errors
    ///
    /// Returns a lifecycle error when no handle is live.
    pub fn info(&self, key: InfoKey) -> Result<Option<InfoValue>> {
        match &self.slot {
            Slot::Ready(handle) | Slot::Executed(handle) => Ok(self.transport.metadata(handle, key)),
            Slot::Unacquired => Err(error::lifecycle("no live handle: acquire first")),
        }
    }

    /// Response of the last execution since the last `acquire`
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// HTTP status of the last execution, `0` when none
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.response.as_ref().map_or(0, |r| r.status_code)
    }

    /// Transport error code of the last execution, `0` when none
    #[must_use]
    pub fn error_code(&self) -> i32 {
        self.response.as_ref().map_or(0, |r| r.transport_error_code)
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        self.response
            .as_ref()
            .map_or("", |r| r.transport_error_message.as_str())
    }

    /// Buffered body of the last execution
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.response.as_ref().and_then(Response::text)
    }

    /// Decode the last buffered body as JSON
    ///
    /// # Errors
    ///
    /// Returns a lifecycle error before any execution, or a decode error when
    /// the body is missing or does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        self.response
            .as_ref()
            .ok_or_else(|| error::lifecycle("no response captured: execute first"))?
            .json()
    }

    /// Reset the request state, close any handle and clear the response
    pub fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self.release();
        self.response = None;
        self
    }

    fn release(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Unacquired) {
            Slot::Ready(handle) | Slot::Executed(handle) => self.transport.close(handle),
            Slot::Unacquired => {}
        }
    }
}

impl Drop for RequestExecutor {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("transport", &self.transport.name())
            .field("codec", &self.codec)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("phase", &self.phase())
            .field("response", &self.response)
            .finish()
    }
}

/// Append `query` to `url`, joining with `&` when a query is already present.
/// A fragment stays at the end.
fn append_query(url: &str, query: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    match fragment {
        Some(fragment) => format!("{base}{separator}{query}#{fragment}"),
        None => format!("{base}{separator}{query}"),
    }
}

/// Label a JSON body unless the caller already chose a content type
fn ensure_json_content_type(handle: &mut Handle) {
    let mut lines = handle
        .option(&OptionKey::HTTP_HEADER)
        .and_then(OptionValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    let labelled = lines.iter().any(|line| {
        line.split_once(':')
            .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("content-type"))
    });
    if !labelled {
        lines.push("Content-Type: application/json".to_string());
        handle.set_option(OptionKey::HTTP_HEADER, lines);
    }
}
