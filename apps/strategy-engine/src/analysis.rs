//! Full strategy analysis.
//!
//! One call recomputes everything a front end displays: the sweep with the
//! per-leg breakdown, risk metrics, leg and portfolio Greeks, Greeks series,
//! the theoretical P&L curve, the expiry breakdown and warnings. Nothing is
//! cached between calls.
//!
//! Independent requests can be analyzed in parallel with [`analyze_batch`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, span, warn};

use crate::config::Config;
use crate::market::MarketParams;
use crate::observability;
use crate::options::{LegId, Strategy};
use crate::pricing::{
    ExpiryBreakdown, Greeks, GreeksPoint, Sweep, expiry_breakdown, generate_sweep,
    greeks_by_dte, greeks_by_price, is_degenerate, leg_greeks, theoretical_pnl,
};
use crate::risk::{
    RiskMetrics, RiskWarning, SizingInput, assess_warnings, compute_risk_metrics, position_size,
};

/// Inputs for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Legs to analyze.
    pub strategy: Strategy,
    /// Market assumptions.
    #[serde(default)]
    pub market: MarketParams,
    /// Optional price for the single-point expiry breakdown.
    #[serde(default)]
    pub expiry_price: Option<f64>,
    /// Sizing inputs; configuration defaults when absent.
    #[serde(default)]
    pub sizing: Option<SizingInput>,
}

impl AnalysisRequest {
    /// Request with default market parameters and no expiry price.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            market: MarketParams::default(),
            expiry_price: None,
            sizing: None,
        }
    }

    /// Set market parameters.
    #[must_use]
    pub const fn with_market(mut self, market: MarketParams) -> Self {
        self.market = market;
        self
    }

    /// Set the expiry price.
    #[must_use]
    pub const fn with_expiry_price(mut self, price: f64) -> Self {
        self.expiry_price = Some(price);
        self
    }
}

/// Greeks of one leg, keyed by identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegGreeks {
    /// Leg identity.
    pub id: LegId,
    /// Leg label.
    pub label: String,
    /// Signed, quantity-scaled Greeks.
    pub greeks: Greeks,
}

/// Everything computed for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Market parameters used.
    pub market: MarketParams,
    /// Price sweep with per-leg breakdown.
    pub sweep: Sweep,
    /// Risk metrics derived from the sweep.
    pub metrics: RiskMetrics,
    /// Recommended number of strategy units.
    pub position_size: Option<u64>,
    /// Per-leg Greeks.
    pub leg_greeks: Vec<LegGreeks>,
    /// Portfolio Greeks.
    pub portfolio_greeks: Greeks,
    /// Portfolio Greeks at each sweep price.
    pub greeks_by_price: Vec<GreeksPoint>,
    /// Portfolio Greeks from current days-to-expiration down to 1.
    pub greeks_by_dte: Vec<GreeksPoint>,
    /// Mark-to-model P&L at each sweep price.
    pub theoretical_pnl: Vec<f64>,
    /// Breakdown at the requested expiry price.
    pub expiry: Option<ExpiryBreakdown>,
    /// Advisory warnings.
    pub warnings: Vec<RiskWarning>,
}

/// Analyze one strategy.
#[must_use]
pub fn analyze(
    strategy: &Strategy,
    params: &MarketParams,
    expiry_price: Option<f64>,
    sizing: &SizingInput,
    config: &Config,
) -> Analysis {
    let _span = span!(Level::DEBUG, "analyze", legs = strategy.len()).entered();

    warn_on_degenerate_inputs(strategy, params);

    let sweep = generate_sweep(strategy, &config.engine);
    let metrics = compute_risk_metrics(strategy, &sweep, config.engine.breakeven_mode, &config.risk);

    let leg_greeks: Vec<LegGreeks> = strategy
        .legs()
        .iter()
        .map(|leg| LegGreeks {
            id: leg.id.clone(),
            label: leg.label(),
            greeks: leg_greeks(leg, params),
        })
        .collect();
    let portfolio_greeks: Greeks = leg_greeks.iter().map(|leg| leg.greeks).sum();

    let warnings = assess_warnings(strategy, &metrics, &portfolio_greeks, &config.risk);
    let position_size = position_size(sizing, metrics.max_loss);

    debug!(
        points = sweep.len(),
        breakevens = metrics.breakevens.len(),
        warnings = warnings.len(),
        "Strategy analyzed"
    );
    observability::record_analysis_run();

    Analysis {
        market: *params,
        greeks_by_price: greeks_by_price(strategy, params, &sweep),
        greeks_by_dte: greeks_by_dte(strategy, params),
        theoretical_pnl: theoretical_pnl(strategy, params, &sweep),
        expiry: expiry_price.map(|price| expiry_breakdown(strategy, price)),
        sweep,
        metrics,
        position_size,
        leg_greeks,
        portfolio_greeks,
        warnings,
    }
}

/// Analyze a request, filling sizing from configuration when absent.
#[must_use]
pub fn analyze_request(request: &AnalysisRequest, config: &Config) -> Analysis {
    let sizing = request
        .sizing
        .unwrap_or_else(|| SizingInput::from_config(&config.risk));
    analyze(
        &request.strategy,
        &request.market,
        request.expiry_price,
        &sizing,
        config,
    )
}

/// Analyze independent requests in parallel. Output order matches input order.
#[must_use]
pub fn analyze_batch(requests: &[AnalysisRequest], config: &Config) -> Vec<Analysis> {
    debug!(requests = requests.len(), "Starting batch analysis");
    requests
        .par_iter()
        .map(|request| analyze_request(request, config))
        .collect()
}

/// Log once per analysis when the closed form is undefined for some leg.
fn warn_on_degenerate_inputs(strategy: &Strategy, params: &MarketParams) {
    let degenerate = strategy
        .legs()
        .iter()
        .filter(|leg| {
            is_degenerate(
                leg.strike,
                params.spot_price,
                params.implied_volatility,
                params.days(),
            )
        })
        .count();
    if degenerate > 0 {
        warn!(
            legs = degenerate,
            spot = params.spot_price,
            iv = params.implied_volatility,
            days = params.days_to_expiration,
            "Greeks undefined for degenerate inputs"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionLeg;
    use crate::pricing::portfolio_greeks;
    use rust_decimal_macros::dec;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn bull_call_spread() -> Strategy {
        Strategy::new(vec![
            OptionLeg::long_call(100.0, 5.0),
            OptionLeg::short_call(105.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_analysis_is_consistent() {
        let strategy = bull_call_spread();
        let params = MarketParams::new(102.0, 0.3, 30, 0.05);
        let sizing = SizingInput::new(dec!(10000), dec!(2));
        let analysis = analyze(&strategy, &params, Some(104.0), &sizing, &Config::default());

        assert_eq!(analysis.sweep.len(), 101);
        assert_eq!(analysis.leg_greeks.len(), 2);
        assert_eq!(analysis.greeks_by_price.len(), analysis.sweep.len());
        assert_eq!(analysis.greeks_by_dte.len(), 30);
        assert_eq!(analysis.theoretical_pnl.len(), analysis.sweep.len());

        let direct = portfolio_greeks(&strategy, &params);
        assert!(approx_eq(analysis.portfolio_greeks.delta, direct.delta, 1e-12));

        // 200 / 3 = 66.67
        assert_eq!(analysis.position_size, Some(66));

        let expiry = analysis.expiry.unwrap();
        assert!(approx_eq(expiry.total, 1.0, 1e-12));
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_request_uses_config_sizing() {
        let request = AnalysisRequest::new(Strategy::single(OptionLeg::long_put(100.0, 4.0)));
        let analysis = analyze_request(&request, &Config::default());
        // 200 / 4 = 50
        assert_eq!(analysis.position_size, Some(50));
        assert!(analysis.expiry.is_none());
    }

    #[test]
    fn test_degenerate_market_still_analyzes() {
        let request = AnalysisRequest::new(Strategy::single(OptionLeg::long_call(100.0, 5.0)))
            .with_market(MarketParams::new(100.0, 0.0, 30, 0.05));
        let analysis = analyze_request(&request, &Config::default());
        assert!(!analysis.portfolio_greeks.is_finite());
        assert_eq!(analysis.metrics.breakevens, vec![105.0]);
    }

    #[test]
    fn test_batch_preserves_order() {
        let requests: Vec<AnalysisRequest> = [90.0, 100.0, 110.0, 120.0]
            .into_iter()
            .map(|strike| AnalysisRequest::new(Strategy::single(OptionLeg::long_call(strike, 5.0))))
            .collect();

        let results = analyze_batch(&requests, &Config::default());
        assert_eq!(results.len(), 4);
        for (request, analysis) in requests.iter().zip(&results) {
            let expected = analyze_request(request, &Config::default());
            assert_eq!(analysis.metrics.breakevens, expected.metrics.breakevens);
        }
        assert_eq!(results[2].metrics.breakevens, vec![115.0]);
    }
}
