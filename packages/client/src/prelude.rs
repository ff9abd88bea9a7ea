//! Fetchkit Prelude
//!
//! The types end users need to build and execute requests.

// Request state and option vocabulary
pub use crate::options::{OptionKey, OptionSet, OptionValue};
pub use crate::state::RequestState;

// Executor and its inputs/outputs
pub use crate::executor::{Phase, PayloadContext, RequestData, RequestExecutor, Response};
pub use crate::config::{ExecutorConfig, HandleMode, TransportErrorPolicy};

// Query encoding
pub use crate::query::{EncodingDialect, QueryEncoder};

// Transport seam
pub use crate::transport::{
    Handle, HyperTransport, InfoKey, InfoValue, ResponseBody, Transport, TransportReply,
};

pub use crate::codec::{JsonCodec, SerdeJsonCodec};

// Error types
pub use crate::error::{Error, HttpError};

// HTTP standard types from http crate
pub use ::http::Method;
