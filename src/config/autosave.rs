//! Autosave configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Background autosave settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AutosaveConfig {
    /// Whether edits are saved in the background at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Idle time after the last edit before saving, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl AutosaveConfig {
    /// Get the debounce delay as Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate autosave configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.debounce_ms == 0 {
            return Err(ValidationError::InvalidDebounce);
        }
        Ok(())
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosave_defaults() {
        let config = AutosaveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.debounce(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_debounce_rejected_when_enabled() {
        let config = AutosaveConfig {
            enabled: true,
            debounce_ms: 0,
        };
        assert!(config.validate().is_err());

        let disabled = AutosaveConfig {
            enabled: false,
            debounce_ms: 0,
        };
        assert!(disabled.validate().is_ok());
    }
}
