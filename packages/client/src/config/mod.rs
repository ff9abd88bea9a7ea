//! Executor configuration
//!
//! Constructor-level policies for the request executor plus the
//! method-neutral base options applied at every `acquire`.

use std::time::Duration;

pub mod validation;

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

use crate::options::{OptionKey, OptionSet};

/// How a non-zero transport error code surfaces from `execute`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportErrorPolicy {
    /// Return a transport error from `execute`
    #[default]
    Raise,
    /// Store the code and message on the response; `execute` succeeds
    Store,
}

/// What happens to the handle after an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleMode {
    /// Close the handle; the next execution needs a fresh `acquire`
    #[default]
    SingleShot,
    /// Keep the handle for metadata queries until the next `acquire`
    Retained,
}

/// Configuration for a `RequestExecutor`
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Default body format for the convenience verbs
    pub encode_as_json: bool,
    pub transport_errors: TransportErrorPolicy,
    pub handle_mode: HandleMode,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            encode_as_json: true,
            transport_errors: TransportErrorPolicy::Raise,
            handle_mode: HandleMode::SingleShot,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("fetchkit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ExecutorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn encode_as_json(mut self, enable: bool) -> Self {
        self.encode_as_json = enable;
        self
    }

    #[must_use]
    pub fn transport_errors(mut self, policy: TransportErrorPolicy) -> Self {
        self.transport_errors = policy;
        self
    }

    #[must_use]
    pub fn handle_mode(mut self, mode: HandleMode) -> Self {
        self.handle_mode = mode;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: &str) -> Self {
        self.user_agent = agent.to_string();
        self
    }

    /// Method-neutral options every acquisition starts from
    #[must_use]
    pub fn base_options(&self) -> OptionSet {
        OptionSet::new()
            .with(OptionKey::TIMEOUT, duration_millis(self.timeout))
            .with(OptionKey::CONNECT_TIMEOUT, duration_millis(self.connect_timeout))
            .with(OptionKey::USER_AGENT, self.user_agent.as_str())
    }
}

impl Validator for ExecutorConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.timeout, "timeout", Duration::from_secs(3600))?;
        ConfigValidator::validate_timeout(
            self.connect_timeout,
            "connect_timeout",
            Duration::from_secs(300),
        )?;
        ConfigValidator::validate_user_agent(&self.user_agent)?;

        if self.connect_timeout > self.timeout {
            return Err(ConfigurationError::Conflict(
                "connect_timeout cannot exceed timeout".to_string(),
            ));
        }

        Ok(())
    }
}

fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
