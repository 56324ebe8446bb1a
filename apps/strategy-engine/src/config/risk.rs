//! Risk heuristics and advisory thresholds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Risk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// VaR(95) as a multiple of |max loss|.
    #[serde(default = "default_var_scale")]
    pub var_scale: f64,
    /// Expected shortfall as a multiple of |max loss|.
    #[serde(default = "default_es_scale")]
    pub es_scale: f64,
    /// Max loss below which a position with short legs is flagged.
    #[serde(default = "default_high_risk_loss_threshold")]
    pub high_risk_loss_threshold: f64,
    /// |Portfolio gamma| above which the position is flagged.
    #[serde(default = "default_high_gamma_threshold")]
    pub high_gamma_threshold: f64,
    /// Account size used when the caller gives none.
    #[serde(default = "default_account_size")]
    pub default_account_size: Decimal,
    /// Percent of the account risked per position.
    #[serde(default = "default_risk_percent")]
    pub default_risk_percent: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            var_scale: default_var_scale(),
            es_scale: default_es_scale(),
            high_risk_loss_threshold: default_high_risk_loss_threshold(),
            high_gamma_threshold: default_high_gamma_threshold(),
            default_account_size: default_account_size(),
            default_risk_percent: default_risk_percent(),
        }
    }
}

const fn default_var_scale() -> f64 {
    0.95
}

const fn default_es_scale() -> f64 {
    1.05
}

const fn default_high_risk_loss_threshold() -> f64 {
    -1000.0
}

const fn default_high_gamma_threshold() -> f64 {
    0.1
}

fn default_account_size() -> Decimal {
    dec!(10000)
}

fn default_risk_percent() -> Decimal {
    dec!(2)
}
