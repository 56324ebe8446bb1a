//! Strategy Engine Binary
//!
//! Analyzes a strategy document and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strategy-engine -- strategy.yaml
//! ```
//!
//! The strategy document:
//!
//! ```yaml
//! symbol: SPY            # optional, pre-populates spot and IV
//! market:                # optional, overrides the configured defaults
//!   spot_price: 100
//!   implied_volatility: 0.3
//!   days_to_expiration: 30
//!   risk_free_rate: 0.05
//! legs:
//!   - { type: call, direction: long, strike: 100, premium: 5 }
//!   - { type: call, direction: short, strike: 105, premium: 2 }
//! expiry_price: 103      # optional
//! account_size: 10000    # optional
//! risk_percent: 2        # optional
//! ```
//!
//! # Environment Variables
//!
//! - `STRATEGY_ENGINE_CONFIG`: Path to the YAML config (default: built-in defaults)
//! - `RUST_LOG`: Log filter (default: `strategy_engine=<configured level>`)

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use strategy_engine::analysis::{AnalysisRequest, analyze_request};
use strategy_engine::config::{Config, load_config};
use strategy_engine::market::{MarketParams, market_params_for};
use strategy_engine::observability::init_logging;
use strategy_engine::options::{OptionLeg, Strategy, sanitize_price};
use strategy_engine::risk::SizingInput;

/// Strategy document read from the command line argument.
#[derive(Debug, Deserialize)]
struct StrategyDocument {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    market: Option<MarketParams>,
    legs: Vec<OptionLeg>,
    #[serde(default)]
    expiry_price: Option<f64>,
    #[serde(default)]
    account_size: Option<Decimal>,
    #[serde(default)]
    risk_percent: Option<Decimal>,
}

fn main() -> Result<()> {
    load_dotenv();

    let config = match std::env::var("STRATEGY_ENGINE_CONFIG") {
        Ok(path) if !path.is_empty() => {
            load_config(Some(&path)).with_context(|| format!("loading config from {path}"))?
        }
        _ => Config::default(),
    };
    init_logging(&config.observability.logging).context("initializing logging")?;

    let path = std::env::args()
        .nth(1)
        .context("usage: strategy-engine <strategy.yaml>")?;
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading strategy file {path}"))?;
    let document: StrategyDocument = serde_yaml_bw::from_str(&contents)
        .with_context(|| format!("parsing strategy file {path}"))?;

    let request = build_request(document, &config)?;
    tracing::info!(
        legs = request.strategy.len(),
        spot = request.market.spot_price,
        "Analyzing strategy"
    );

    let analysis = analyze_request(&request, &config);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

/// Resolve market parameters and sizing for a strategy document.
fn build_request(document: StrategyDocument, config: &Config) -> Result<AnalysisRequest> {
    let strategy = Strategy::new(document.legs)?;

    let mut market = document
        .market
        .unwrap_or_else(|| MarketParams::from_config(&config.pricing));
    if let Some(symbol) = &document.symbol {
        market = market_params_for(symbol, &market)?;
    }

    let defaults = SizingInput::from_config(&config.risk);
    let sizing = SizingInput::new(
        document.account_size.unwrap_or(defaults.account_size),
        document.risk_percent.unwrap_or(defaults.risk_percent),
    );

    Ok(AnalysisRequest {
        strategy,
        market,
        expiry_price: document.expiry_price.map(sanitize_price),
        sizing: Some(sizing),
    })
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn document(yaml: &str) -> StrategyDocument {
        serde_yaml_bw::from_str(yaml).unwrap()
    }

    #[test]
    fn test_negative_expiry_price_falls_back_to_zero() {
        let doc = document(
            r"
legs:
  - { type: call, direction: long, strike: 100, premium: 5 }
expiry_price: -20
",
        );
        let request = build_request(doc, &Config::default()).unwrap();
        assert_eq!(request.expiry_price, Some(0.0));
    }

    #[test]
    fn test_expiry_price_and_sizing_pass_through() {
        let doc = document(
            r"
symbol: spy
legs:
  - { type: put, direction: long, strike: 580, premium: 6 }
expiry_price: 575.5
account_size: 50000
",
        );
        let config = Config::default();
        let request = build_request(doc, &config).unwrap();

        assert_eq!(request.expiry_price, Some(575.5));
        assert_eq!(request.market.spot_price, 585.25);
        let sizing = request.sizing.unwrap();
        assert_eq!(sizing.account_size, Decimal::from(50000));
        assert_eq!(sizing.risk_percent, config.risk.default_risk_percent);
    }
}
