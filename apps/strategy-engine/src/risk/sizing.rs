//! Position sizing from a fixed fraction of the account.
//!
//! The recommended number of strategy units is
//! `floor(account_size * risk_percent / 100 / |max_loss|)`, computed in
//! decimal arithmetic. Strategies whose loss is unbounded or non-negative get
//! no recommendation.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use strategy_engine::risk::{SizingInput, position_size};
//!
//! let input = SizingInput::new(dec!(10000), dec!(2));
//! // Risking $200 on a spread that can lose $300 per unit: none fit.
//! assert_eq!(position_size(&input, -300.0), Some(0));
//! assert_eq!(position_size(&input, -3.0), Some(66));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;

/// Account inputs for position sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingInput {
    /// Account size in currency units.
    pub account_size: Decimal,
    /// Percent of the account to risk (2 = 2%).
    pub risk_percent: Decimal,
}

impl SizingInput {
    /// Create sizing inputs.
    #[must_use]
    pub const fn new(account_size: Decimal, risk_percent: Decimal) -> Self {
        Self {
            account_size,
            risk_percent,
        }
    }

    /// Defaults from risk configuration.
    #[must_use]
    pub const fn from_config(config: &RiskConfig) -> Self {
        Self::new(config.default_account_size, config.default_risk_percent)
    }

    /// Currency amount at risk per position, or `None` if it overflows.
    #[must_use]
    pub fn risk_amount(&self) -> Option<Decimal> {
        self.account_size
            .checked_mul(self.risk_percent)?
            .checked_div(Decimal::ONE_HUNDRED)
    }
}

impl Default for SizingInput {
    fn default() -> Self {
        Self::from_config(&RiskConfig::default())
    }
}

/// Recommended number of strategy units for a given max loss.
///
/// Returns `None` when `max_loss` is not a finite negative number, or when
/// the inputs overflow decimal arithmetic.
#[must_use]
pub fn position_size(input: &SizingInput, max_loss: f64) -> Option<u64> {
    if !(max_loss.is_finite() && max_loss < 0.0) {
        return None;
    }
    let loss = Decimal::from_f64_retain(max_loss.abs())?;
    if loss.is_zero() {
        return None;
    }
    let units = input.risk_amount()?.checked_div(loss)?.floor();
    if units.is_sign_negative() {
        return Some(0);
    }
    units.to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_input_from_config() {
        let input = SizingInput::default();
        assert_eq!(input.account_size, dec!(10000));
        assert_eq!(input.risk_percent, dec!(2));
        assert_eq!(input.risk_amount(), Some(dec!(200)));
    }

    #[test]
    fn test_floor_of_risk_over_loss() {
        let input = SizingInput::new(dec!(10000), dec!(2));
        assert_eq!(position_size(&input, -5.0), Some(40));
        assert_eq!(position_size(&input, -3.0), Some(66));
        assert_eq!(position_size(&input, -250.0), Some(0));
    }

    #[test]
    fn test_no_recommendation_without_bounded_loss() {
        let input = SizingInput::default();
        assert_eq!(position_size(&input, f64::NEG_INFINITY), None);
        assert_eq!(position_size(&input, 0.0), None);
        assert_eq!(position_size(&input, 12.0), None);
        assert_eq!(position_size(&input, f64::NAN), None);
    }

    #[test]
    fn test_overflowing_account_gives_no_recommendation() {
        let input = SizingInput::new(Decimal::MAX, dec!(50));
        assert_eq!(input.risk_amount(), None);
        assert_eq!(position_size(&input, -5.0), None);

        // Fits in a Decimal but not in u64 units
        let input = SizingInput::new(dec!(1000000000000000000000000), dec!(100));
        assert_eq!(position_size(&input, -1.0), None);
    }

    #[test]
    fn test_fractional_risk_percent() {
        let input = SizingInput::new(dec!(25000), dec!(1.5));
        // 375 / 2.5 = 150
        assert_eq!(position_size(&input, -2.5), Some(150));
    }
}
