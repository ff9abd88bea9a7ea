//! Configuration validation utilities

use std::time::Duration;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration conflict: {0}")]
    Conflict(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if timeout values are zero or exceed limits
    /// - `InvalidParameter` - if parameters are outside valid ranges
    /// - `Conflict` - if configuration settings conflict with each other
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds `max`
    pub fn validate_timeout(timeout: Duration, name: &str, max: Duration) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout > max {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed {} seconds",
                max.as_secs()
            )));
        }

        Ok(())
    }

    /// Validate user agent string
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the user agent is
    /// empty, longer than 1000 characters, or contains control characters.
    pub fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
        if user_agent.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "User agent cannot be empty".to_string(),
            ));
        }

        if user_agent.len() > 1000 {
            return Err(ConfigurationError::InvalidParameter(
                "User agent must not exceed 1000 characters".to_string(),
            ));
        }

        if user_agent.chars().any(char::is_control) {
            return Err(ConfigurationError::InvalidParameter(
                "User agent cannot contain control characters".to_string(),
            ));
        }

        Ok(())
    }
}
