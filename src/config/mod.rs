//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `AUCTION_WIZARD`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use auction_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init_tracing();
//!
//! println!("Talking to {}", config.api.normalized_base_url());
//! ```

mod api;
mod autosave;
mod error;
mod logging;

pub use api::ApiConfig;
pub use autosave::AutosaveConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Marketplace backend (base URL, token, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Background autosave
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AUCTION_WIZARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `AUCTION_WIZARD__API__BASE_URL=https://...` -> `api.base_url`
    /// - `AUCTION_WIZARD__AUTOSAVE__DEBOUNCE_MS=1500` -> `autosave.debounce_ms`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AUCTION_WIZARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.autosave.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "AUCTION_WIZARD__API__BASE_URL",
        "AUCTION_WIZARD__API__AUTH_TOKEN",
        "AUCTION_WIZARD__API__TIMEOUT_SECS",
        "AUCTION_WIZARD__AUTOSAVE__ENABLED",
        "AUCTION_WIZARD__AUTOSAVE__DEBOUNCE_MS",
        "AUCTION_WIZARD__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.autosave.debounce_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUCTION_WIZARD__API__BASE_URL", "https://market.example.com");
        env::set_var("AUCTION_WIZARD__API__AUTH_TOKEN", "tok_123");
        env::set_var("AUCTION_WIZARD__API__TIMEOUT_SECS", "10");
        env::set_var("AUCTION_WIZARD__AUTOSAVE__DEBOUNCE_MS", "500");
        env::set_var("AUCTION_WIZARD__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://market.example.com");
        assert_eq!(
            config.api.auth_token.as_ref().map(|t| t.expose_secret().clone()),
            Some("tok_123".to_string())
        );
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.autosave.debounce_ms, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_validated_rejects_bad_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUCTION_WIZARD__API__BASE_URL", "market.example.com");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::InvalidApiUrl))
        ));
    }

    #[test]
    fn test_autosave_can_be_disabled() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUCTION_WIZARD__AUTOSAVE__ENABLED", "false");
        let result = AppConfig::load();
        clear_env();

        assert!(!result.unwrap().autosave.enabled);
    }
}
