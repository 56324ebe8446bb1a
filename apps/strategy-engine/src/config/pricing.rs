//! Pricing model defaults for Greeks and template premiums.

use serde::{Deserialize, Serialize};

/// Pricing model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Risk-free rate (annualized).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Implied volatility used until the caller sets one.
    #[serde(default = "default_iv")]
    pub default_iv: f64,
    /// Days to expiration used until the caller sets one.
    #[serde(default = "default_days_to_expiration")]
    pub default_days_to_expiration: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            default_iv: default_iv(),
            default_days_to_expiration: default_days_to_expiration(),
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    0.05
}

const fn default_iv() -> f64 {
    0.30
}

const fn default_days_to_expiration() -> u32 {
    30
}
