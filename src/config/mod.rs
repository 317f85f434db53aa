//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PAW_ADOPTION` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use paw_adoption::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let policy = config.policy.to_policy();
//! println!("Cancellation window: {}h", policy.cancellation_window_hours);
//! ```

mod database;
mod error;
mod logging;
mod policy;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use policy::PolicyConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Adoption rule overrides
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAW_ADOPTION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAW_ADOPTION__DATABASE__URL=...` -> `database.url = ...`
    /// - `PAW_ADOPTION__POLICY__MIN_POINTS=5` -> `policy.min_points = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAW_ADOPTION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.logging.validate()?;
        self.policy.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "PAW_ADOPTION__DATABASE__URL",
        "PAW_ADOPTION__LOGGING__JSON",
        "PAW_ADOPTION__POLICY__MIN_POINTS",
        "PAW_ADOPTION__POLICY__CANCELLATION_WINDOW_HOURS",
        "PAW_ADOPTION__DATABASE__RUN_MIGRATIONS",
    ];

    fn set_minimal_env() {
        env::set_var(
            "PAW_ADOPTION__DATABASE__URL",
            "postgresql://paw@localhost/adoptions",
        );
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://paw@localhost/adoptions");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.policy.min_points, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAW_ADOPTION__LOGGING__JSON", "true");
        env::set_var("PAW_ADOPTION__POLICY__MIN_POINTS", "3");
        env::set_var("PAW_ADOPTION__POLICY__CANCELLATION_WINDOW_HOURS", "48");
        env::set_var("PAW_ADOPTION__DATABASE__RUN_MIGRATIONS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert!(config.logging.json);
        assert!(config.database.run_migrations);
        let policy = config.policy.to_policy();
        assert_eq!(policy.min_points, 3);
        assert_eq!(policy.cancellation_window_hours, 48);
        assert_eq!(policy.cancellation_cooldown_hours, 72);
    }

    #[test]
    fn test_missing_database_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        assert!(AppConfig::load().is_err());
    }
}
