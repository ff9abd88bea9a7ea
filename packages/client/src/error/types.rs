use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `fetchkit_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors raised while configuring or executing a request.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Invalid configuration input (missing URL, rejected config values)
    Builder,
    /// Operation invoked in the wrong executor phase
    Lifecycle,
    /// Transport reported a non-zero error code after invocation
    Transport { code: i32, message: String },
    /// JSON encoding of the request body failed
    Codec,
    /// Response body could not be decoded
    Decode,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None, url: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("fetchkit_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Builder => f.write_str("builder error")?,
            Kind::Lifecycle => f.write_str("request lifecycle error")?,
            Kind::Transport { code, message } => {
                write!(f, "transport error {code}: {message}")?;
            }
            Kind::Codec => f.write_str("error encoding request body")?,
            Kind::Decode => f.write_str("error decoding response body")?,
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " ({url})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
