//! Advisory risk flags.

use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::observability;
use crate::options::Strategy;
use crate::pricing::Greeks;

use super::metrics::RiskMetrics;

/// Threshold-triggered advisory flag. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskWarning {
    /// Max loss is unbounded.
    UndefinedRisk,
    /// Short legs with a max loss beyond the configured threshold.
    HighRiskPosition,
    /// |Portfolio gamma| above the configured threshold.
    HighGammaRisk,
}

impl RiskWarning {
    /// Stable warning code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UndefinedRisk => "UNDEFINED_RISK",
            Self::HighRiskPosition => "HIGH_RISK_POSITION",
            Self::HighGammaRisk => "HIGH_GAMMA_RISK",
        }
    }

    /// Human-readable message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::UndefinedRisk => "Unlimited loss potential: the position has undefined risk",
            Self::HighRiskPosition => "High risk position: short legs with a large maximum loss",
            Self::HighGammaRisk => "High gamma risk: delta will change rapidly with price",
        }
    }
}

impl std::fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Evaluate every warning, in declaration order.
#[must_use]
pub fn assess_warnings(
    strategy: &Strategy,
    metrics: &RiskMetrics,
    portfolio: &Greeks,
    config: &RiskConfig,
) -> Vec<RiskWarning> {
    let mut warnings = Vec::new();

    if metrics.is_loss_unbounded() {
        warnings.push(RiskWarning::UndefinedRisk);
    }
    if strategy.has_short_leg() && metrics.max_loss < config.high_risk_loss_threshold {
        warnings.push(RiskWarning::HighRiskPosition);
    }
    if portfolio.gamma.abs() > config.high_gamma_threshold {
        warnings.push(RiskWarning::HighGammaRisk);
    }

    for warning in &warnings {
        observability::record_risk_warning(warning.code());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BreakevenMode, EngineConfig};
    use crate::options::OptionLeg;
    use crate::pricing::generate_sweep;
    use crate::risk::compute_risk_metrics;

    fn assess(strategy: &Strategy, gamma: f64) -> Vec<RiskWarning> {
        let config = RiskConfig::default();
        let sweep = generate_sweep(strategy, &EngineConfig::builder_view());
        let metrics = compute_risk_metrics(strategy, &sweep, BreakevenMode::GridPoint, &config);
        let greeks = Greeks::new(0.0, gamma, 0.0, 0.0, 0.0);
        assess_warnings(strategy, &metrics, &greeks, &config)
    }

    #[test]
    fn test_long_call_has_no_warnings() {
        let strategy = Strategy::single(OptionLeg::long_call(100.0, 5.0));
        assert!(assess(&strategy, 0.03).is_empty());
    }

    #[test]
    fn test_naked_short_call_is_undefined_and_high_risk() {
        let strategy = Strategy::single(OptionLeg::short_call(100.0, 5.0));
        assert_eq!(
            assess(&strategy, -0.03),
            vec![RiskWarning::UndefinedRisk, RiskWarning::HighRiskPosition]
        );
    }

    #[test]
    fn test_large_short_put_is_high_risk() {
        // 50 * 30 = 1500 loss at the bottom of the sweep
        let strategy = Strategy::single(OptionLeg::short_put(100.0, 0.0).with_quantity(30));
        assert_eq!(assess(&strategy, 0.0), vec![RiskWarning::HighRiskPosition]);
    }

    #[test]
    fn test_gamma_threshold_is_absolute() {
        let strategy = Strategy::single(OptionLeg::long_call(100.0, 5.0));
        assert_eq!(assess(&strategy, 0.25), vec![RiskWarning::HighGammaRisk]);
        assert_eq!(assess(&strategy, -0.25), vec![RiskWarning::HighGammaRisk]);
        assert!(assess(&strategy, 0.1).is_empty());
    }

    #[test]
    fn test_codes() {
        assert_eq!(RiskWarning::UndefinedRisk.to_string(), "UNDEFINED_RISK");
        assert_eq!(
            serde_json::to_string(&RiskWarning::HighGammaRisk).unwrap(),
            "\"HIGH_GAMMA_RISK\""
        );
    }
}
