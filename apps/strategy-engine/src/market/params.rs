//! Market parameters shared by every leg of a strategy.

use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;

/// Flat market assumptions used for Greeks and theoretical values.
///
/// One implied volatility and one rate apply to all legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Current underlying price.
    pub spot_price: f64,
    /// Implied volatility (annualized, decimal: 0.25 = 25%).
    pub implied_volatility: f64,
    /// Calendar days until expiration (>= 1 in normal use).
    pub days_to_expiration: u32,
    /// Risk-free rate (annualized, decimal).
    pub risk_free_rate: f64,
}

impl MarketParams {
    /// Create market parameters.
    #[must_use]
    pub const fn new(
        spot_price: f64,
        implied_volatility: f64,
        days_to_expiration: u32,
        risk_free_rate: f64,
    ) -> Self {
        Self {
            spot_price,
            implied_volatility,
            days_to_expiration,
            risk_free_rate,
        }
    }

    /// Defaults taken from pricing configuration, spot at 100.
    #[must_use]
    pub const fn from_config(config: &PricingConfig) -> Self {
        Self {
            spot_price: 100.0,
            implied_volatility: config.default_iv,
            days_to_expiration: config.default_days_to_expiration,
            risk_free_rate: config.risk_free_rate,
        }
    }

    /// Same parameters at a different spot.
    #[must_use]
    pub const fn with_spot(mut self, spot_price: f64) -> Self {
        self.spot_price = spot_price;
        self
    }

    /// Same parameters at a different days-to-expiration.
    #[must_use]
    pub const fn with_days(mut self, days_to_expiration: u32) -> Self {
        self.days_to_expiration = days_to_expiration;
        self
    }

    /// Days to expiration as a float, for the pricing formulas.
    #[must_use]
    pub fn days(&self) -> f64 {
        f64::from(self.days_to_expiration)
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_pricing_config() {
        let params = MarketParams::default();
        assert_eq!(params.spot_price, 100.0);
        assert!((params.risk_free_rate - 0.05).abs() < f64::EPSILON);
        assert!((params.implied_volatility - 0.30).abs() < f64::EPSILON);
        assert_eq!(params.days_to_expiration, 30);
    }

    #[test]
    fn test_with_overrides() {
        let params = MarketParams::default().with_spot(450.0).with_days(7);
        assert_eq!(params.spot_price, 450.0);
        assert_eq!(params.days(), 7.0);
    }
}
