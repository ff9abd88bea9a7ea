pub mod classification;
pub mod constructors;
pub mod conversions;
pub mod types;

pub use constructors::*;
pub use types::{Error, Inner, Kind, Result};

// Type alias kept for call sites that name the HTTP flavour explicitly
pub type HttpError = Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
