//! Payoff at expiration for a leg and for a strategy.

use serde::{Deserialize, Serialize};

use crate::options::{Direction, OptionLeg, OptionType, Strategy};

/// Intrinsic value of one unit at the given underlying price.
#[must_use]
pub fn intrinsic_value(option_type: OptionType, strike: f64, underlying_price: f64) -> f64 {
    match option_type {
        OptionType::Call => (underlying_price - strike).max(0.0),
        OptionType::Put => (strike - underlying_price).max(0.0),
    }
}

/// Signed P&L of a leg at expiration.
///
/// Long: `intrinsic - premium`. Short: `premium - intrinsic`. Times quantity.
#[must_use]
pub fn evaluate_leg(leg: &OptionLeg, underlying_price: f64) -> f64 {
    let intrinsic = intrinsic_value(leg.option_type, leg.strike, underlying_price);
    let per_unit = match leg.direction {
        Direction::Long => intrinsic - leg.premium,
        Direction::Short => leg.premium - intrinsic,
    };
    per_unit * f64::from(leg.quantity)
}

/// Strategy P&L at expiration: the sum of leg payoffs.
#[must_use]
pub fn evaluate_portfolio(strategy: &Strategy, underlying_price: f64) -> f64 {
    strategy
        .legs()
        .iter()
        .map(|leg| evaluate_leg(leg, underlying_price))
        .sum()
}

/// One row of the expiry breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegPayoff {
    /// Leg label, e.g. "Long Call $100".
    pub label: String,
    /// Strike.
    pub strike: f64,
    /// Premium.
    pub premium: f64,
    /// Quantity.
    pub quantity: u32,
    /// P&L at the expiry price.
    pub payoff: f64,
}

/// P&L at a single expiry price, leg by leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryBreakdown {
    /// Underlying price at expiration.
    pub expiry_price: f64,
    /// Per-leg rows in strategy order.
    pub legs: Vec<LegPayoff>,
    /// Total strategy P&L.
    pub total: f64,
}

impl ExpiryBreakdown {
    /// A zero total counts as profit.
    #[must_use]
    pub fn is_profit(&self) -> bool {
        self.total >= 0.0
    }
}

/// Evaluate a strategy at one expiry price with a per-leg breakdown.
#[must_use]
pub fn expiry_breakdown(strategy: &Strategy, expiry_price: f64) -> ExpiryBreakdown {
    let legs: Vec<LegPayoff> = strategy
        .legs()
        .iter()
        .map(|leg| LegPayoff {
            label: leg.label(),
            strike: leg.strike,
            premium: leg.premium,
            quantity: leg.quantity,
            payoff: evaluate_leg(leg, expiry_price),
        })
        .collect();
    let total = legs.iter().map(|row| row.payoff).sum();

    ExpiryBreakdown {
        expiry_price,
        legs,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Strategy;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as PropStrategy;

    #[test]
    fn test_long_call_payoff() {
        let leg = OptionLeg::long_call(100.0, 5.0);
        assert_eq!(evaluate_leg(&leg, 90.0), -5.0);
        assert_eq!(evaluate_leg(&leg, 105.0), 0.0);
        assert_eq!(evaluate_leg(&leg, 120.0), 15.0);
    }

    #[test]
    fn test_short_put_payoff_with_quantity() {
        let leg = OptionLeg::short_put(100.0, 3.0).with_quantity(2);
        assert_eq!(evaluate_leg(&leg, 110.0), 6.0);
        assert_eq!(evaluate_leg(&leg, 90.0), -14.0);
    }

    #[test]
    fn test_expiry_breakdown() {
        let strategy = Strategy::new(vec![
            OptionLeg::long_call(100.0, 5.0),
            OptionLeg::short_call(105.0, 2.0),
        ])
        .unwrap();

        let breakdown = expiry_breakdown(&strategy, 103.0);
        assert_eq!(breakdown.legs.len(), 2);
        assert_eq!(breakdown.legs[0].label, "Long Call $100");
        assert!((breakdown.legs[0].payoff - (-2.0)).abs() < 1e-12);
        assert!((breakdown.legs[1].payoff - 2.0).abs() < 1e-12);
        assert!(breakdown.total.abs() < 1e-12);
        assert!(breakdown.is_profit());
    }

    fn arb_leg() -> impl PropStrategy<Value = OptionLeg> {
        (
            prop_oneof![Just(OptionType::Call), Just(OptionType::Put)],
            prop_oneof![Just(Direction::Long), Just(Direction::Short)],
            1.0..500.0f64,
            0.0..50.0f64,
            1u32..20,
        )
            .prop_map(|(t, d, k, p, q)| OptionLeg::new(t, d, k, p, q))
    }

    proptest! {
        #[test]
        fn long_call_non_decreasing(k in 1.0..500.0f64, p in 0.0..50.0f64, a in 0.0..1000.0f64, b in 0.0..1000.0f64) {
            let leg = OptionLeg::long_call(k, p);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(evaluate_leg(&leg, lo) <= evaluate_leg(&leg, hi));
        }

        #[test]
        fn long_put_non_increasing(k in 1.0..500.0f64, p in 0.0..50.0f64, a in 0.0..1000.0f64, b in 0.0..1000.0f64) {
            let leg = OptionLeg::long_put(k, p);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(evaluate_leg(&leg, lo) >= evaluate_leg(&leg, hi));
        }

        #[test]
        fn portfolio_is_sum_of_legs(legs in prop::collection::vec(arb_leg(), 1..6), price in 0.0..1000.0f64) {
            let expected: f64 = legs.iter().map(|leg| evaluate_leg(leg, price)).sum();
            let strategy = Strategy::new(legs).unwrap();
            prop_assert!((evaluate_portfolio(&strategy, price) - expected).abs() < 1e-9);
        }
    }
}
