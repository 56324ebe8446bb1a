//! Configuration module for the strategy engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it. Every section is optional and falls back to defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("sweep steps: {}", config.engine.sweep_step_count);
//! ```

mod engine;
mod observability;
mod pricing;
mod risk;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use engine::{BreakevenMode, EngineConfig, SpanPolicy};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use pricing::PricingConfig;
pub use risk::RiskConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sweep and breakeven settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Pricing model defaults.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Risk heuristics and warning thresholds.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let invalid =
        |msg: &str| -> Result<(), ConfigError> { Err(ConfigError::ValidationError(msg.to_string())) };

    if config.engine.sweep_step_count < 2 {
        return invalid("engine.sweep_step_count must be at least 2");
    }

    match config.engine.span_policy {
        SpanPolicy::Fixed { fallback } => {
            if !(fallback.is_finite() && fallback > 0.0) {
                return invalid("engine.span_policy.fallback must be positive");
            }
        }
        SpanPolicy::Proportional { ratio, minimum } => {
            if !(ratio.is_finite() && ratio > 0.0) {
                return invalid("engine.span_policy.ratio must be positive");
            }
            if !(minimum.is_finite() && minimum >= 0.0) {
                return invalid("engine.span_policy.minimum must be non-negative");
            }
        }
    }

    if !(0.0..=1.0).contains(&config.pricing.risk_free_rate) {
        return invalid("risk_free_rate must be between 0.0 and 1.0");
    }

    if !(config.pricing.default_iv.is_finite() && config.pricing.default_iv > 0.0) {
        return invalid("pricing.default_iv must be positive");
    }

    if config.pricing.default_days_to_expiration == 0 {
        return invalid("pricing.default_days_to_expiration must be at least 1");
    }

    if config.risk.var_scale < 0.0 || config.risk.es_scale < 0.0 {
        return invalid("risk.var_scale and risk.es_scale must be non-negative");
    }

    if config.risk.default_account_size <= Decimal::ZERO {
        return invalid("risk.default_account_size must be positive");
    }

    if config.risk.default_risk_percent <= Decimal::ZERO
        || config.risk.default_risk_percent > Decimal::ONE_HUNDRED
    {
        return invalid("risk.default_risk_percent must be in (0, 100]");
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.engine, EngineConfig::builder_view());
        assert_eq!(config.engine.breakeven_mode, BreakevenMode::GridPoint);
        assert!((config.pricing.risk_free_rate - 0.05).abs() < f64::EPSILON);
        assert!((config.risk.var_scale - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.risk.default_account_size, dec!(10000));
        assert_eq!(config.observability.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "format: ${STRATEGY_ENGINE_TEST_NONEXISTENT_VAR:-json}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "format: json");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${STRATEGY_ENGINE_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "level: ");
    }

    #[test]
    fn test_validation_step_count() {
        let yaml = r"
engine:
  sweep_step_count: 1
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for a single-step sweep");
        };
        assert!(err.to_string().contains("sweep_step_count"));
    }

    #[test]
    fn test_validation_invalid_risk_free_rate() {
        let yaml = r"
pricing:
  risk_free_rate: 1.5
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid risk_free_rate");
        };
        assert!(err.to_string().contains("risk_free_rate"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_risk_percent_range() {
        let yaml = r"
risk:
  default_risk_percent: 150
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
engine:
  sweep_step_count: 200
  span_policy:
    kind: proportional
    ratio: 0.3
    minimum: 30
  breakeven_mode: interpolated

pricing:
  risk_free_rate: 0.04
  default_iv: 0.25
  default_days_to_expiration: 45

risk:
  var_scale: 0.9
  high_gamma_threshold: 0.2
  default_account_size: 25000
  default_risk_percent: 1.5

observability:
  logging:
    level: "debug"
    format: "json"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(
            config.engine,
            EngineConfig::live_simulator().with_breakeven_mode(BreakevenMode::Interpolated)
        );
        assert!((config.pricing.risk_free_rate - 0.04).abs() < f64::EPSILON);
        assert_eq!(config.pricing.default_days_to_expiration, 45);
        assert!((config.risk.high_gamma_threshold - 0.2).abs() < f64::EPSILON);
        assert!((config.risk.es_scale - 1.05).abs() < f64::EPSILON);
        assert_eq!(config.risk.default_account_size, dec!(25000));
        assert_eq!(config.risk.default_risk_percent, dec!(1.5));
        assert_eq!(config.observability.logging.format, "json");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "engine:\n  sweep_step_count: 50").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.engine.sweep_step_count, 50);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/strategy-engine.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
