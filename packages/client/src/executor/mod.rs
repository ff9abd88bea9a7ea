//! Request execution
//!
//! `RequestExecutor` drives the Unacquired → Ready → Executed handle
//! lifecycle: `acquire` resolves the option set and opens a transport
//! handle, `execute` applies the verb and data, invokes the transport once
//! and captures the response.

pub mod core;
pub mod methods;
pub mod payload;
pub mod response;

pub use self::core::{Phase, RequestExecutor};
pub use payload::{PayloadContext, PayloadPreparer, RequestData, prepare_form_payload, prepare_payload};
pub use response::Response;
