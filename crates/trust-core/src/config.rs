//! # Signing Configuration
//!
//! Runtime knobs for signature collection, loaded from defaults or the
//! environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LT_CALLBACK_TIMEOUT_MS` | `30000` | Limit for one external signer call; `0` disables it |
//! | `LT_PARALLEL_SIGNING` | `true` | Sign composite children concurrently |

use std::time::Duration;
use thiserror::Error;

/// Default limit for one external signer call.
pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held an unparseable value
    #[error("Invalid value for {variable}: {value}")]
    InvalidVariable { variable: &'static str, value: String },

    /// A configured timeout of zero would fail every callback
    #[error("Callback timeout must be greater than zero")]
    ZeroTimeout,
}

/// Signing behavior shared by every signatory invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    /// Limit applied to each external signer call; `None` waits forever
    pub callback_timeout: Option<Duration>,
    /// Whether the children of a composite signatory sign concurrently
    pub parallel_signing: bool,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            callback_timeout: Some(DEFAULT_CALLBACK_TIMEOUT),
            parallel_signing: true,
        }
    }
}

impl SigningConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("LT_CALLBACK_TIMEOUT_MS") {
            let millis: u64 = value.parse().map_err(|_| ConfigError::InvalidVariable {
                variable: "LT_CALLBACK_TIMEOUT_MS",
                value: value.clone(),
            })?;
            config.callback_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        if let Ok(value) = std::env::var("LT_PARALLEL_SIGNING") {
            config.parallel_signing = match value.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidVariable {
                        variable: "LT_PARALLEL_SIGNING",
                        value,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the external signer limit.
    pub fn with_callback_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.callback_timeout = timeout;
        self
    }

    /// Toggle concurrent signing of composite children.
    pub fn with_parallel_signing(mut self, parallel: bool) -> Self {
        self.parallel_signing = parallel;
        self
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.callback_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
