//! Hierarchical configuration loading built on figment.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::ClientConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("api_key cannot be empty")]
    EmptyApiKey,

    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_retries: {0}. Must be at most 10")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than or equal to max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. tollgate.yaml in the working directory (optional)
    /// 3. Environment variables (`TOLLGATE_*` prefix, highest priority)
    pub fn load() -> Result<ClientConfig> {
        let config: ClientConfig = Figment::new()
            .merge(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file("tollgate.yaml"))
            .merge(Env::prefixed("TOLLGATE_").split("__"))
            .extract()
            .context("failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<ClientConfig> {
        let config: ClientConfig = Figment::new()
            .merge(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        if config.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }

        if config.retry.max_retries > 10 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ClientConfig {
        ClientConfig {
            api_key: "test-api-key".to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn default_config_lacks_an_api_key() {
        assert!(matches!(
            ConfigLoader::validate(&ClientConfig::default()),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn config_with_api_key_validates() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = valid_config();
        config.http.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn rejects_inverted_backoff_bounds() {
        let mut config = valid_config();
        config.retry.initial_backoff_ms = 10_000;
        config.retry.max_backoff_ms = 100;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(10_000, 100))
        ));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn loads_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "api_key: from-file\nbase_url: https://api.example.test\nretry:\n  max_retries: 2\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.base_url, "https://api.example.test");
        assert_eq!(config.retry.max_retries, 2);
        // untouched fields keep their defaults
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn environment_overrides_defaults() {
        temp_env::with_vars(
            [
                ("TOLLGATE_API_KEY", Some("from-env")),
                ("TOLLGATE_RETRY__MAX_RETRIES", Some("3")),
            ],
            || {
                let config = ConfigLoader::load().unwrap();
                assert_eq!(config.api_key, "from-env");
                assert_eq!(config.retry.max_retries, 3);
            },
        );
    }
}
