use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_EFFECT_TIMEOUT_MS: u64 = 30_000;

/// Error raised while reading configuration text.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tuning for the capability dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Upper bound on a single capability execution before it is failed.
    pub effect_timeout_ms: u64,
}

impl DispatcherConfig {
    pub fn effect_timeout(&self) -> Duration {
        Duration::from_millis(self.effect_timeout_ms)
    }

    pub fn with_effect_timeout(mut self, timeout: Duration) -> Self {
        self.effect_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Parse a TOML document such as `effect_timeout_ms = 500`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effect_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "effect_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            effect_timeout_ms: DEFAULT_EFFECT_TIMEOUT_MS,
        }
    }
}
