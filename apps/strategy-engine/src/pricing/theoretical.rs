//! Mark-to-model P&L before expiration (the "today" line next to the expiry payoff).

use crate::market::MarketParams;
use crate::options::{OptionLeg, Strategy};

use super::black_scholes::black_scholes_price;
use super::sweep::Sweep;

/// Model P&L of one leg if the underlying traded at `spot` today.
#[must_use]
pub fn theoretical_leg_pnl(leg: &OptionLeg, params: &MarketParams, spot: f64) -> f64 {
    let value = black_scholes_price(
        leg.option_type,
        leg.strike,
        spot,
        params.implied_volatility,
        params.days(),
        params.risk_free_rate,
    );
    leg.signed_quantity() * (value - leg.premium)
}

/// Model P&L of the strategy at each sweep price.
#[must_use]
pub fn theoretical_pnl(strategy: &Strategy, params: &MarketParams, sweep: &Sweep) -> Vec<f64> {
    sweep
        .points()
        .iter()
        .map(|point| {
            strategy
                .legs()
                .iter()
                .map(|leg| theoretical_leg_pnl(leg, params, point.price))
                .sum()
        })
        .collect()
}
