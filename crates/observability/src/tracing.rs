//! Tracing/logging initialization.

use crate::config::{ConfigError, LogFormat, ObservabilityConfig};

/// Install the global subscriber described by `config`.
///
/// Safe to call multiple times (subsequent calls are no-ops). Fails only when
/// the configured filter does not parse.
pub fn init(config: &ObservabilityConfig) -> Result<(), ConfigError> {
    let filter = config.env_filter()?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    Ok(())
}
