//! Opt-in tracing setup for host applications.
//!
//! The crate logs through `tracing` macros everywhere; hosts that already
//! install a subscriber can ignore this module entirely.

use anyhow::{bail, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Install a global tracing subscriber per the logging configuration.
///
/// Fails if the level or format is unknown, or if a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .try_init(),
        "pretty" => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(env_filter)
            .try_init(),
        other => bail!("unknown log format: {other}"),
    };

    result.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn parse_log_level(level: &str) -> Result<Level> {
    Ok(match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("unknown log level: {other}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn init_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            format: "pretty".to_string(),
        };
        assert!(init(&config).is_err());
    }
}
