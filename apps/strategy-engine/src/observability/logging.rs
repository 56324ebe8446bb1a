//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence; the configured level is added as a directive
//! for the engine's own target.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};

use crate::config::LoggingConfig;

/// Error type for logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the environment filter for a logging configuration.
///
/// # Errors
///
/// Returns an error if the configured level does not parse as a directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    let directive: Directive = format!("strategy_engine={}", config.level)
        .parse()
        .map_err(|e: ParseError| LoggingError::InvalidLevel {
            level: config.level.clone(),
            message: e.to_string(),
        })?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Install the global tracing subscriber in `pretty` or `json` format.
///
/// # Errors
///
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;

    let result = if config.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
    };
    result.map_err(|e| LoggingError::SubscriberError(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}
