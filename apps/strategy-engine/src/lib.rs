// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Strategy Engine - Options Payoff & Risk Core
//!
//! Pure calculation engine for multi-leg options strategies.
//!
//! # Components
//!
//! - **Payoff Evaluator** (`pricing`): leg and strategy P&L at expiration
//! - **Sweep Generator** (`pricing`): price grid around the strikes with a
//!   per-leg breakdown
//! - **Greeks Engine** (`pricing`): Black-Scholes Greeks per leg and per
//!   portfolio, plus Greeks-by-price and Greeks-by-DTE series
//! - **Risk Metrics** (`risk`): max profit/loss, breakevens, probability of
//!   profit, VaR/ES heuristics, Kelly estimate, sizing and warnings
//!
//! Every computation is a pure function of its arguments. The only mutable
//! state is the [`session::Session`], owned by the caller.
//!
//! # Example
//!
//! ```rust
//! use strategy_engine::{Config, OptionLeg, Strategy, analyze_request, AnalysisRequest};
//!
//! let strategy = Strategy::new(vec![
//!     OptionLeg::long_call(100.0, 5.0),
//!     OptionLeg::short_call(105.0, 2.0),
//! ])
//! .unwrap();
//!
//! let analysis = analyze_request(&AnalysisRequest::new(strategy), &Config::default());
//! assert_eq!(analysis.metrics.breakevens.len(), 1);
//! assert!((analysis.metrics.net_premium + 3.0).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// One-shot and batch analysis.
pub mod analysis;

/// YAML configuration.
pub mod config;

/// Error codes and the engine error type.
pub mod error;

/// Market parameters and reference symbols.
pub mod market;

/// Metrics and logging.
pub mod observability;

/// Option legs, strategies and templates.
pub mod options;

/// Payoff, sweep and Black-Scholes.
pub mod pricing;

/// Risk metrics, sizing and warnings.
pub mod risk;

/// Session state.
pub mod session;

pub use analysis::{Analysis, AnalysisRequest, analyze, analyze_batch, analyze_request};
pub use config::{Config, ConfigError, load_config};
pub use error::{EngineError, ErrorCode};
pub use market::MarketParams;
pub use options::{Direction, LegId, OptionLeg, OptionType, Strategy};
pub use pricing::{Greeks, Sweep};
pub use risk::{RiskMetrics, RiskWarning};
pub use session::Session;
