//! Greeks calculation and aggregation.
//!
//! Provides the Greeks struct for option sensitivities and functions
//! for computing them per leg, per portfolio, and along a price or
//! days-to-expiration axis for charting.

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::market::MarketParams;
use crate::observability;
use crate::options::{OptionLeg, Strategy};

use super::black_scholes::black_scholes_greeks;
use super::sweep::Sweep;

/// Greeks for an option, a leg or a portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta - rate of change of option value with respect to underlying price.
    /// Range: -1.0 to 1.0 for a single long unit.
    pub delta: f64,
    /// Gamma - rate of change of delta with respect to underlying price.
    pub gamma: f64,
    /// Theta - value change per calendar day.
    pub theta: f64,
    /// Vega - value change per 1% change in IV.
    pub vega: f64,
    /// Rho - value change per 1% change in rates.
    pub rho: f64,
}

impl Greeks {
    /// Create new Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Create zero Greeks.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Scale Greeks by a quantity (positive for long, negative for short).
    #[must_use]
    pub fn scale(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
            rho: self.rho * quantity,
        }
    }

    /// Whether every field is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Add for Greeks {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

impl std::iter::Sum for Greeks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Greeks of one leg: raw Black-Scholes Greeks times the leg's signed quantity.
#[must_use]
pub fn leg_greeks(leg: &OptionLeg, params: &MarketParams) -> Greeks {
    observability::record_greeks_computation(leg.option_type.as_str());
    black_scholes_greeks(
        leg.option_type,
        leg.strike,
        params.spot_price,
        params.implied_volatility,
        params.days(),
        params.risk_free_rate,
    )
    .scale(leg.signed_quantity())
}

/// Portfolio Greeks: field-wise sum of leg Greeks.
#[must_use]
pub fn portfolio_greeks(strategy: &Strategy, params: &MarketParams) -> Greeks {
    strategy
        .legs()
        .iter()
        .map(|leg| leg_greeks(leg, params))
        .sum()
}

/// Portfolio Greeks at one point of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksPoint {
    /// Axis value (underlying price or days to expiration).
    pub x: f64,
    /// Portfolio Greeks at that value.
    pub greeks: Greeks,
}

/// Portfolio Greeks at every price of a sweep, other parameters fixed.
#[must_use]
pub fn greeks_by_price(strategy: &Strategy, params: &MarketParams, sweep: &Sweep) -> Vec<GreeksPoint> {
    sweep
        .points()
        .iter()
        .map(|point| GreeksPoint {
            x: point.price,
            greeks: portfolio_greeks(strategy, &params.with_spot(point.price)),
        })
        .collect()
}

/// Portfolio Greeks for each days-to-expiration from the current value down to 1.
#[must_use]
pub fn greeks_by_dte(strategy: &Strategy, params: &MarketParams) -> Vec<GreeksPoint> {
    (1..=params.days_to_expiration)
        .rev()
        .map(|days| GreeksPoint {
            x: f64::from(days),
            greeks: portfolio_greeks(strategy, &params.with_days(days)),
        })
        .collect()
}
