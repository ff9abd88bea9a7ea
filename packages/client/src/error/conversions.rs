use super::types::{Error, Kind};

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::new(Kind::Builder).with(error)
    }
}

impl From<crate::config::ConfigurationError> for Error {
    fn from(error: crate::config::ConfigurationError) -> Self {
        Error::new(Kind::Builder).with(error)
    }
}
