//! Market parameters and the reference symbol table.

mod params;
mod tickers;

pub use params::MarketParams;
pub use tickers::{TickerInfo, lookup, market_params_for, tickers};
