//! Logging initialization for the isoprobe CLI.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `IsoprobeConfig`. Logs go to stderr so that stdout carries only the
//! scenario label and command output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use isoprobe_core::config::{GeneralConfig, validate_log_level};

use crate::error::CliError;

/// Apply `--log-level` on top of the configured level.
///
/// The flag accepts the same level names as `general.log_level`.
pub fn apply_log_level(general: &mut GeneralConfig, level: Option<&str>) -> Result<(), CliError> {
    if let Some(level) = level {
        validate_log_level(level)
            .map_err(|e| CliError::Config(format!("--log-level '{level}': {e}")))?;
        general.log_level = level.to_owned();
    }
    Ok(())
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable output
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_flag_overrides_config() {
        let mut general = GeneralConfig::default();
        apply_log_level(&mut general, Some("debug")).unwrap();
        assert_eq!(general.log_level, "debug");

        apply_log_level(&mut general, None).unwrap();
        assert_eq!(general.log_level, "debug");
    }

    #[test]
    fn unknown_log_level_flag_is_config_error() {
        let mut general = GeneralConfig::default();
        let err = apply_log_level(&mut general, Some("loud")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("loud"));
        assert_eq!(general.log_level, "info");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let config = GeneralConfig {
            log_level: "info".to_owned(),
            log_format: "xml".to_owned(),
        };
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("unknown log format 'xml'"));
    }
}
