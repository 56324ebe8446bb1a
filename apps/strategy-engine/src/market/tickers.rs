//! Static symbol table used to pre-populate market parameters.
//!
//! Reference values only; nothing here is live market data.

use serde::Serialize;

use crate::error::EngineError;

use super::params::MarketParams;

/// Reference data for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickerInfo {
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Listing exchange.
    pub exchange: &'static str,
    /// Reference price.
    pub price: f64,
    /// Daily change in percent.
    pub change_pct: f64,
    /// Implied volatility estimate (decimal).
    pub iv: f64,
}

const TICKERS: &[TickerInfo] = &[
    TickerInfo {
        symbol: "SPY",
        name: "SPDR S&P 500 ETF Trust",
        exchange: "NYSE Arca",
        price: 585.25,
        change_pct: 0.42,
        iv: 0.14,
    },
    TickerInfo {
        symbol: "QQQ",
        name: "Invesco QQQ Trust",
        exchange: "NASDAQ",
        price: 505.80,
        change_pct: 0.61,
        iv: 0.19,
    },
    TickerInfo {
        symbol: "AAPL",
        name: "Apple Inc.",
        exchange: "NASDAQ",
        price: 228.50,
        change_pct: -0.35,
        iv: 0.24,
    },
    TickerInfo {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        exchange: "NASDAQ",
        price: 418.30,
        change_pct: 0.18,
        iv: 0.22,
    },
    TickerInfo {
        symbol: "NVDA",
        name: "NVIDIA Corporation",
        exchange: "NASDAQ",
        price: 138.90,
        change_pct: 1.85,
        iv: 0.48,
    },
    TickerInfo {
        symbol: "TSLA",
        name: "Tesla, Inc.",
        exchange: "NASDAQ",
        price: 251.40,
        change_pct: -1.12,
        iv: 0.55,
    },
    TickerInfo {
        symbol: "AMZN",
        name: "Amazon.com, Inc.",
        exchange: "NASDAQ",
        price: 197.10,
        change_pct: 0.73,
        iv: 0.29,
    },
    TickerInfo {
        symbol: "IWM",
        name: "iShares Russell 2000 ETF",
        exchange: "NYSE Arca",
        price: 224.60,
        change_pct: -0.21,
        iv: 0.21,
    },
];

/// All known symbols, in table order.
#[must_use]
pub fn tickers() -> &'static [TickerInfo] {
    TICKERS
}

/// Look up a symbol (case-insensitive).
///
/// # Errors
///
/// Returns `UNKNOWN_SYMBOL` if the symbol is not in the table.
pub fn lookup(symbol: &str) -> Result<&'static TickerInfo, EngineError> {
    let symbol = symbol.trim();
    TICKERS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| EngineError::unknown_symbol(symbol))
}

/// Market parameters with spot and IV taken from the symbol's reference data.
///
/// Days to expiration and rate are kept from `base`.
///
/// # Errors
///
/// Returns `UNKNOWN_SYMBOL` if the symbol is not in the table.
pub fn market_params_for(symbol: &str, base: &MarketParams) -> Result<MarketParams, EngineError> {
    let info = lookup(symbol)?;
    Ok(MarketParams {
        spot_price: info.price,
        implied_volatility: info.iv,
        ..*base
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let info = lookup("spy").unwrap();
        assert_eq!(info.symbol, "SPY");
        assert_eq!(lookup(" NVDA ").unwrap().exchange, "NASDAQ");
    }

    #[test]
    fn test_unknown_symbol() {
        let err = lookup("XYZ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownSymbol);
        assert_eq!(err.context(), &[("symbol".to_string(), "XYZ".to_string())]);
    }

    #[test]
    fn test_market_params_keep_days_and_rate() {
        let base = MarketParams::new(100.0, 0.3, 45, 0.04);
        let params = market_params_for("TSLA", &base).unwrap();
        assert_eq!(params.spot_price, 251.40);
        assert_eq!(params.implied_volatility, 0.55);
        assert_eq!(params.days_to_expiration, 45);
        assert_eq!(params.risk_free_rate, 0.04);
    }

    #[test]
    fn test_table_is_sane() {
        assert_eq!(tickers().len(), 8);
        for t in tickers() {
            assert!(t.price > 0.0 && t.iv > 0.0, "{} has invalid reference data", t.symbol);
        }
    }
}
