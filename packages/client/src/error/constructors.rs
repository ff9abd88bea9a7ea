use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for an operation attempted in the wrong executor phase.
pub fn lifecycle<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Lifecycle).with(e.into())
}

/// Creates an `Error` carrying a transport error code and message.
pub fn transport(code: i32, message: impl Into<String>) -> Error {
    Error::new(Kind::Transport {
        code,
        message: message.into(),
    })
}

/// Creates an `Error` for a request body encoding failure.
pub fn codec<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Codec).with(e.into())
}

/// Creates an `Error` for a decode error.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates the `Error` raised when `execute` runs without a live handle.
pub fn must_acquire_first() -> Error {
    lifecycle("must acquire first")
}
