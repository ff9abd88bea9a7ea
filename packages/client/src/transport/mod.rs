//! Transport capability
//!
//! The executor hands a fully-resolved option set to a [`Transport`], which
//! opens a [`Handle`], performs the exchange on `invoke`, and records status
//! metadata on the handle for later queries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hashbrown::HashMap;

use crate::error::Result;
use crate::options::{OptionKey, OptionSet, OptionValue};

pub mod codes;
pub mod hyper_transport;

pub use hyper_transport::HyperTransport;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Metadata recorded by a transport after an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKey {
    ResponseCode,
    EffectiveUrl,
    ContentType,
    TotalTime,
    SizeDownload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Int(i64),
    Text(String),
    Duration(Duration),
}

impl InfoValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            InfoValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            InfoValue::Duration(duration) => Some(*duration),
            _ => None,
        }
    }
}

/// Body returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body buffered and returned to the caller
    Buffered(String),
    /// Body delivered to the output sink instead of being returned
    Streamed,
}

impl ResponseBody {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Buffered(text) => Some(text),
            ResponseBody::Streamed => None,
        }
    }
}

/// Outcome of a single `invoke`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportReply {
    pub body: Option<ResponseBody>,
    pub error_code: i32,
    pub error_message: String,
}

impl TransportReply {
    #[must_use]
    pub fn success(body: ResponseBody) -> Self {
        Self {
            body: Some(body),
            error_code: codes::OK,
            error_message: String::new(),
        }
    }

    #[must_use]
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            body: None,
            error_code: code,
            error_message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_code == codes::OK
    }
}

/// Live transport connection state.
///
/// Created by [`Transport::open`], exclusively owned by one executor and
/// consumed by a single `invoke`.
#[derive(Debug)]
pub struct Handle {
    id: u64,
    options: OptionSet,
    info: HashMap<InfoKey, InfoValue>,
}

impl Handle {
    #[must_use]
    pub fn new(options: OptionSet) -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            options,
            info: HashMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Options the transport will act on
    #[must_use]
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn set_option(&mut self, key: OptionKey, value: impl Into<OptionValue>) {
        self.options.insert(key, value);
    }

    #[must_use]
    pub fn option(&self, key: &OptionKey) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Record exchange metadata
    pub fn record(&mut self, key: InfoKey, value: InfoValue) {
        self.info.insert(key, value);
    }

    #[must_use]
    pub fn info(&self, key: InfoKey) -> Option<&InfoValue> {
        self.info.get(&key)
    }
}

/// HTTP transport capability.
///
/// Implementations perform one blocking exchange per `invoke` and report
/// failures through the reply's error code rather than a `Result`.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Open a handle for the resolved option set
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot accept the option set.
    fn open(&self, options: OptionSet) -> Result<Handle> {
        Ok(Handle::new(options))
    }

    /// Perform the exchange described by the handle's options
    fn invoke(&self, handle: &mut Handle) -> TransportReply;

    /// Metadata recorded on the handle by the last `invoke`
    fn metadata(&self, handle: &Handle, key: InfoKey) -> Option<InfoValue> {
        handle.info(key).cloned()
    }

    /// Release the handle
    fn close(&self, handle: Handle) {
        tracing::trace!(handle = handle.id(), transport = self.name(), "closing handle");
    }

    /// Transport name for logging
    fn name(&self) -> &'static str;
}
