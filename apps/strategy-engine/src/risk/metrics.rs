//! Aggregate risk metrics derived from a sweep.
//!
//! All figures are heuristics over the uniform sweep grid, not
//! distributional estimates:
//!
//! - max profit / max loss are the sweep extremes, replaced by +/- infinity
//!   when the call exposure above the top strike is unbalanced,
//! - probability of profit is the share of grid points with a positive total,
//! - VaR(95) and expected shortfall are linear scalings of |max loss|,
//! - the Kelly fraction uses probability of profit as the win rate.
//!
//! Infinite figures serialize as the string `"unbounded"` so JSON consumers
//! can tell them apart from undefined (NaN) values, which serialize as `null`.

use serde::{Serialize, Serializer};

use crate::config::{BreakevenMode, RiskConfig};
use crate::options::Strategy;
use crate::pricing::Sweep;

/// Risk summary of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    /// Maximum P&L; `f64::INFINITY` when unbounded.
    #[serde(serialize_with = "serialize_bound")]
    pub max_profit: f64,
    /// Minimum P&L; `f64::NEG_INFINITY` when unbounded.
    #[serde(serialize_with = "serialize_bound")]
    pub max_loss: f64,
    /// Underlying prices where the total crosses zero, ascending.
    pub breakevens: Vec<f64>,
    /// Signed entry cash flow (credit positive).
    pub net_premium: f64,
    /// Percentage of sweep points with a positive total.
    pub probability_of_profit: f64,
    /// |max loss| scaled by the VaR factor.
    #[serde(serialize_with = "serialize_bound")]
    pub value_at_risk_95: f64,
    /// |max loss| scaled by the expected shortfall factor.
    #[serde(serialize_with = "serialize_bound")]
    pub expected_shortfall: f64,
    /// Kelly estimate in percent, clamped to [0, 100].
    pub kelly_fraction: f64,
    /// max profit / |max loss|, when the loss is bounded and non-zero.
    #[serde(serialize_with = "serialize_optional_bound")]
    pub risk_reward_ratio: Option<f64>,
}

/// Value used in serialized output for an infinite figure.
pub const UNBOUNDED: &str = "unbounded";

fn serialize_bound<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(UNBOUNDED)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[allow(clippy::ref_option)] // serde passes the field by reference
fn serialize_optional_bound<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_bound(v, serializer),
        None => serializer.serialize_none(),
    }
}

impl RiskMetrics {
    /// Whether upside is unbounded.
    #[must_use]
    pub fn is_profit_unbounded(&self) -> bool {
        self.max_profit == f64::INFINITY
    }

    /// Whether downside is unbounded.
    #[must_use]
    pub fn is_loss_unbounded(&self) -> bool {
        self.max_loss == f64::NEG_INFINITY
    }
}

/// Compute every risk metric for a strategy and its sweep.
#[must_use]
pub fn compute_risk_metrics(
    strategy: &Strategy,
    sweep: &Sweep,
    mode: BreakevenMode,
    config: &RiskConfig,
) -> RiskMetrics {
    let (mut max_profit, mut max_loss) = sweep_extremes(sweep);

    let call_exposure = strategy.net_call_exposure();
    if call_exposure > 0.0 {
        max_profit = f64::INFINITY;
    } else if call_exposure < 0.0 {
        max_loss = f64::NEG_INFINITY;
    }

    let probability_of_profit = probability_of_profit(sweep);
    let loss_magnitude = max_loss.abs();

    let risk_reward_ratio =
        (max_loss.is_finite() && max_loss < 0.0).then(|| max_profit / loss_magnitude);

    RiskMetrics {
        max_profit,
        max_loss,
        breakevens: find_breakevens(sweep, mode),
        net_premium: strategy.net_premium(),
        probability_of_profit,
        value_at_risk_95: loss_magnitude * config.var_scale,
        expected_shortfall: loss_magnitude * config.es_scale,
        kelly_fraction: kelly_fraction(probability_of_profit, max_profit, max_loss),
        risk_reward_ratio,
    }
}

/// Largest and smallest sweep totals. An empty sweep yields `(0, 0)`.
#[must_use]
pub fn sweep_extremes(sweep: &Sweep) -> (f64, f64) {
    if sweep.is_empty() {
        return (0.0, 0.0);
    }
    sweep
        .points()
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), p| {
            (hi.max(p.total), lo.min(p.total))
        })
}

/// Zero crossings of the sweep total.
///
/// A crossing is a pair of adjacent points with `prev < 0 <= cur` or
/// `cur < 0 <= prev`. [`BreakevenMode::GridPoint`] reports `cur.price`;
/// [`BreakevenMode::Interpolated`] reports the linear zero between the pair.
#[must_use]
pub fn find_breakevens(sweep: &Sweep, mode: BreakevenMode) -> Vec<f64> {
    sweep
        .points()
        .windows(2)
        .filter_map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            let crosses =
                (prev.total < 0.0 && cur.total >= 0.0) || (prev.total >= 0.0 && cur.total < 0.0);
            if !crosses {
                return None;
            }
            Some(match mode {
                BreakevenMode::GridPoint => cur.price,
                BreakevenMode::Interpolated => {
                    let slope = (cur.total - prev.total) / (cur.price - prev.price);
                    prev.price - prev.total / slope
                }
            })
        })
        .collect()
}

/// Percentage of sweep points with a strictly positive total.
#[must_use]
pub fn probability_of_profit(sweep: &Sweep) -> f64 {
    if sweep.is_empty() {
        return 0.0;
    }
    let winners = sweep.points().iter().filter(|p| p.total > 0.0).count();
    winners as f64 / sweep.len() as f64 * 100.0
}

/// Kelly estimate in percent: `pop/100 * max_profit / |max_loss| * 100`,
/// clamped to [0, 100]; 0 when the loss is zero or unbounded.
#[must_use]
pub fn kelly_fraction(probability_of_profit: f64, max_profit: f64, max_loss: f64) -> f64 {
    if max_loss == 0.0 || !max_loss.is_finite() {
        return 0.0;
    }
    let raw = probability_of_profit / 100.0 * max_profit / max_loss.abs() * 100.0;
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) }
}
