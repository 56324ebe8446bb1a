//! Risk metrics, position sizing and advisory warnings.
//!
//! Everything here is derived from a sweep and the portfolio Greeks:
//!
//! - Max profit / max loss with unbounded detection
//! - Breakeven crossings (grid point or interpolated)
//! - Probability of profit, VaR / expected shortfall heuristics, Kelly estimate
//! - Fixed-fraction position sizing in decimal arithmetic
//! - Threshold warnings (undefined risk, high risk, high gamma)
//!
//! # Example
//!
//! ```rust
//! use strategy_engine::config::{BreakevenMode, EngineConfig, RiskConfig};
//! use strategy_engine::options::{OptionLeg, Strategy};
//! use strategy_engine::pricing::generate_sweep;
//! use strategy_engine::risk::compute_risk_metrics;
//!
//! let strategy = Strategy::single(OptionLeg::long_call(100.0, 5.0));
//! let sweep = generate_sweep(&strategy, &EngineConfig::builder_view());
//! let metrics = compute_risk_metrics(
//!     &strategy,
//!     &sweep,
//!     BreakevenMode::GridPoint,
//!     &RiskConfig::default(),
//! );
//! assert_eq!(metrics.breakevens, vec![105.0]);
//! assert!(metrics.is_profit_unbounded());
//! ```

mod metrics;
pub mod sizing;
mod warnings;

pub use metrics::{
    RiskMetrics, UNBOUNDED, compute_risk_metrics, find_breakevens, kelly_fraction,
    probability_of_profit, sweep_extremes,
};
pub use sizing::{SizingInput, position_size};
pub use warnings::{RiskWarning, assess_warnings};
