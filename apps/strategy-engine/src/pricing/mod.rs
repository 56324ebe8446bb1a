//! Payoff, sweep and Black-Scholes pricing.
//!
//! This module provides:
//! - Payoff evaluation per leg and per strategy at expiration
//! - The price sweep used for charting and risk metrics
//! - Black-Scholes value and Greeks (closed form, polynomial normal CDF)
//! - Greeks aggregation and Greeks-by-price / Greeks-by-DTE series
//!
//! # Example
//!
//! ```
//! use strategy_engine::config::EngineConfig;
//! use strategy_engine::options::{OptionLeg, Strategy};
//! use strategy_engine::pricing::{evaluate_portfolio, generate_sweep};
//!
//! let strategy = Strategy::single(OptionLeg::long_call(100.0, 5.0));
//! assert_eq!(evaluate_portfolio(&strategy, 110.0), 5.0);
//!
//! let sweep = generate_sweep(&strategy, &EngineConfig::builder_view());
//! assert_eq!(sweep.len(), 101);
//! ```

mod black_scholes;
mod greeks;
mod normal;
mod payoff;
mod sweep;
mod theoretical;

pub use black_scholes::{DAYS_PER_YEAR, black_scholes_greeks, black_scholes_price, is_degenerate};
pub use greeks::{Greeks, GreeksPoint, greeks_by_dte, greeks_by_price, leg_greeks, portfolio_greeks};
pub use normal::{norm_cdf, norm_pdf};
pub use payoff::{
    ExpiryBreakdown, LegPayoff, evaluate_leg, evaluate_portfolio, expiry_breakdown,
    intrinsic_value,
};
pub use sweep::{PricePoint, Sweep, generate_sweep};
pub use theoretical::{theoretical_leg_pnl, theoretical_pnl};
