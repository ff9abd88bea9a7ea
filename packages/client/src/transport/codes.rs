//! Transport error codes
//!
//! Numbering follows libcurl so codes stay meaningful to anyone who has
//! debugged a curl transfer.

pub const OK: i32 = 0;
pub const UNSUPPORTED_PROTOCOL: i32 = 1;
pub const FAILED_INIT: i32 = 2;
pub const URL_MALFORMAT: i32 = 3;
pub const COULDNT_RESOLVE_HOST: i32 = 6;
pub const COULDNT_CONNECT: i32 = 7;
pub const WRITE_ERROR: i32 = 23;
pub const OPERATION_TIMEDOUT: i32 = 28;
pub const SSL_CONNECT_ERROR: i32 = 35;
pub const BAD_FUNCTION_ARGUMENT: i32 = 43;
pub const GOT_NOTHING: i32 = 52;
pub const SEND_ERROR: i32 = 55;
pub const RECV_ERROR: i32 = 56;

/// Short description of a transport error code
#[must_use]
pub fn describe(code: i32) -> &'static str {
    match code {
        OK => "no error",
        UNSUPPORTED_PROTOCOL => "unsupported protocol",
        FAILED_INIT => "failed initialization",
        URL_MALFORMAT => "URL using bad/illegal format",
        COULDNT_RESOLVE_HOST => "could not resolve host name",
        COULDNT_CONNECT => "could not connect to server",
        WRITE_ERROR => "failed writing received data",
        OPERATION_TIMEDOUT => "operation timed out",
        SSL_CONNECT_ERROR => "TLS connect error",
        BAD_FUNCTION_ARGUMENT => "bad option value",
        GOT_NOTHING => "server returned nothing",
        SEND_ERROR => "failed sending data to the peer",
        RECV_ERROR => "failure when receiving data from the peer",
        _ => "unknown transport error",
    }
}
