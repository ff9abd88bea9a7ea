use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error is from invalid builder input.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if an operation was invoked in the wrong executor phase.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self.inner.kind, Kind::Lifecycle)
    }

    /// Returns true if the transport reported a failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport { .. })
    }

    /// Returns true if encoding the request body failed.
    #[must_use]
    pub fn is_codec(&self) -> bool {
        matches!(self.inner.kind, Kind::Codec)
    }

    /// Returns true if decoding the response body failed.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.inner.kind, Kind::Decode)
    }

    /// Transport error code, when this is a transport error
    #[must_use]
    pub fn transport_code(&self) -> Option<i32> {
        match &self.inner.kind {
            Kind::Transport { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Transport error message, when this is a transport error
    #[must_use]
    pub fn transport_message(&self) -> Option<&str> {
        match &self.inner.kind {
            Kind::Transport { message, .. } => Some(message),
            _ => None,
        }
    }
}
