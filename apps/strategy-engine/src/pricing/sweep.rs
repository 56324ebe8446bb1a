//! Price sweep: the discretized grid of underlying prices around the strikes.
//!
//! The grid spans `[max(0, min_strike - pad), max_strike + pad]` in a fixed
//! number of equal steps, both ends included. `pad` is the strike range, or
//! a fallback when every leg shares one strike (see [`SpanPolicy`]).
//! The whole sequence is rebuilt on every call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, SpanPolicy};
use crate::observability;
use crate::options::Strategy;

use super::payoff::evaluate_leg;

/// P&L at one price of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Underlying price at expiration.
    pub price: f64,
    /// Per-leg payoff, in strategy order.
    pub legs: Vec<f64>,
    /// Strategy total.
    pub total: f64,
}

/// An ordered price/P&L table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    start: f64,
    end: f64,
    step: f64,
    points: Vec<PricePoint>,
}

impl Sweep {
    /// All points, ascending by price.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Lowest price of the grid.
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Highest price of the grid.
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Grid spacing; bounds breakeven resolution.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the sweep has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price series.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Total P&L series.
    #[must_use]
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total).collect()
    }

    /// Payoff series of a single leg (by position in the strategy).
    #[must_use]
    pub fn leg_series(&self, leg_index: usize) -> Option<Vec<f64>> {
        self.points
            .iter()
            .map(|p| p.legs.get(leg_index).copied())
            .collect()
    }

    /// Total clipped at zero from below (profit shading).
    #[must_use]
    pub fn profit_zone(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total.max(0.0)).collect()
    }

    /// Total clipped at zero from above (loss shading).
    #[must_use]
    pub fn loss_zone(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total.min(0.0)).collect()
    }

    /// Index of the grid point closest to `price`.
    #[must_use]
    pub fn nearest_index(&self, price: f64) -> usize {
        self.points
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(best, best_dist), (i, p)| {
                let dist = (p.price - price).abs();
                if dist < best_dist { (i, dist) } else { (best, best_dist) }
            })
            .0
    }
}

impl SpanPolicy {
    /// Padding added beyond the strikes on each side, given the strike range.
    #[must_use]
    pub fn padding(&self, range: f64) -> f64 {
        match *self {
            Self::Fixed { fallback } => {
                if range > 0.0 {
                    range
                } else {
                    fallback
                }
            }
            Self::Proportional { ratio, minimum } => (ratio * range).max(minimum),
        }
    }
}

/// Build the sweep for a strategy.
#[must_use]
pub fn generate_sweep(strategy: &Strategy, config: &EngineConfig) -> Sweep {
    let (min_strike, max_strike) = strategy.strike_bounds();
    let padding = config.span_policy.padding(max_strike - min_strike);

    let start = (min_strike - padding).max(0.0);
    let end = max_strike + padding;
    let steps = config.sweep_step_count.max(1);
    let step = (end - start) / f64::from(steps);

    let points: Vec<PricePoint> = (0..=steps)
        .map(|i| {
            let price = if i == steps {
                end
            } else {
                step.mul_add(f64::from(i), start)
            };
            let legs: Vec<f64> = strategy
                .legs()
                .iter()
                .map(|leg| evaluate_leg(leg, price))
                .collect();
            let total = legs.iter().sum();
            PricePoint { price, legs, total }
        })
        .collect();

    debug!(
        legs = strategy.len(),
        points = points.len(),
        start,
        end,
        step,
        "Generated price sweep"
    );
    observability::record_sweep_generation(points.len());

    Sweep {
        start,
        end,
        step,
        points,
    }
}
