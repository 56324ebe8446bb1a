//! Strategy: the ordered, never-empty collection of legs.
//!
//! Order matters only for display (leg series are reported in this order).
//! Valuation is the plain sum of leg valuations.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorCode};

use super::leg::{LegId, OptionLeg};
use super::parse::{parse_price, parse_quantity};
use super::types::{Direction, OptionType};

/// An edit to a single leg field.
///
/// Numeric fields carry the raw text entered by the user; the
/// parse-or-default policy is applied when the edit lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegField<'a> {
    /// Switch call/put.
    OptionType(OptionType),
    /// Switch long/short.
    Direction(Direction),
    /// New strike text (invalid -> 0).
    Strike(&'a str),
    /// New premium text (invalid -> 0).
    Premium(&'a str),
    /// New quantity text (invalid -> 1).
    Quantity(&'a str),
}

/// An options strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionLeg>", into = "Vec<OptionLeg>")]
pub struct Strategy {
    legs: Vec<OptionLeg>,
}

impl Strategy {
    /// Create a strategy from legs.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_REQUEST` if `legs` is empty.
    pub fn new(legs: Vec<OptionLeg>) -> Result<Self, EngineError> {
        if legs.is_empty() {
            return Err(EngineError::invalid_request(
                "a strategy must hold at least one leg",
            ));
        }
        Ok(Self {
            legs: legs.into_iter().map(OptionLeg::sanitized).collect(),
        })
    }

    /// Strategy holding a single leg.
    #[must_use]
    pub fn single(leg: OptionLeg) -> Self {
        Self {
            legs: vec![leg.sanitized()],
        }
    }

    /// All legs in display order.
    #[must_use]
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Number of legs (always >= 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Look up a leg by identity.
    #[must_use]
    pub fn get(&self, id: &LegId) -> Option<&OptionLeg> {
        self.legs.iter().find(|leg| &leg.id == id)
    }

    /// Append a leg.
    pub fn push(&mut self, leg: OptionLeg) {
        self.legs.push(leg.sanitized());
    }

    /// Remove a leg by identity.
    ///
    /// Removing the last remaining leg is refused: the strategy is left
    /// unchanged and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns `LEG_NOT_FOUND` if no leg has this identity.
    pub fn remove(&mut self, id: &LegId) -> Result<bool, EngineError> {
        let index = self.index_of(id)?;
        if self.legs.len() == 1 {
            tracing::debug!(leg_id = %id, "refusing to remove the last leg");
            return Ok(false);
        }
        self.legs.remove(index);
        Ok(true)
    }

    /// Apply a field edit to a leg.
    ///
    /// # Errors
    ///
    /// Returns `LEG_NOT_FOUND` if no leg has this identity.
    pub fn update(&mut self, id: &LegId, field: LegField<'_>) -> Result<&OptionLeg, EngineError> {
        let index = self.index_of(id)?;
        let leg = &mut self.legs[index];
        match field {
            LegField::OptionType(option_type) => leg.option_type = option_type,
            LegField::Direction(direction) => leg.direction = direction,
            LegField::Strike(text) => leg.strike = parse_price(text),
            LegField::Premium(text) => leg.premium = parse_price(text),
            LegField::Quantity(text) => leg.quantity = parse_quantity(text),
        }
        Ok(leg)
    }

    /// Smallest and largest strike across legs.
    #[must_use]
    pub fn strike_bounds(&self) -> (f64, f64) {
        self.legs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), leg| {
                (lo.min(leg.strike), hi.max(leg.strike))
            })
    }

    /// Signed entry cash flow: long legs pay premium, short legs receive it.
    #[must_use]
    pub fn net_premium(&self) -> f64 {
        self.legs.iter().map(OptionLeg::net_premium).sum()
    }

    /// Net call units: long call quantity minus short call quantity.
    ///
    /// This is the slope of the payoff curve above the highest strike.
    #[must_use]
    pub fn net_call_exposure(&self) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.option_type == OptionType::Call)
            .map(OptionLeg::signed_quantity)
            .sum()
    }

    /// Whether any leg is short.
    #[must_use]
    pub fn has_short_leg(&self) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.direction == Direction::Short)
    }

    fn index_of(&self, id: &LegId) -> Result<usize, EngineError> {
        self.legs
            .iter()
            .position(|leg| &leg.id == id)
            .ok_or_else(|| {
                EngineError::new(ErrorCode::LegNotFound, "no leg with this id")
                    .with_context("leg_id", id.as_str())
            })
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::single(OptionLeg::default())
    }
}

impl TryFrom<Vec<OptionLeg>> for Strategy {
    type Error = EngineError;

    fn try_from(legs: Vec<OptionLeg>) -> Result<Self, Self::Error> {
        Self::new(legs)
    }
}

impl From<Strategy> for Vec<OptionLeg> {
    fn from(strategy: Strategy) -> Self {
        strategy.legs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bull_call_spread() -> Strategy {
        Strategy::new(vec![
            OptionLeg::long_call(100.0, 5.0).with_id("long"),
            OptionLeg::short_call(105.0, 2.0).with_id("short"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_strategy_rejected() {
        let err = Strategy::new(Vec::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_remove_last_leg_is_noop() {
        let mut strategy = Strategy::single(OptionLeg::long_call(100.0, 5.0).with_id("only"));
        let before = strategy.clone();

        let removed = strategy.remove(&LegId::from("only")).unwrap();

        assert!(!removed);
        assert_eq!(strategy, before);
        assert_eq!(strategy.len(), 1);
    }

    #[test]
    fn test_remove_leg() {
        let mut strategy = bull_call_spread();
        assert!(strategy.remove(&LegId::from("short")).unwrap());
        assert_eq!(strategy.len(), 1);
        assert!(strategy.get(&LegId::from("long")).is_some());
    }

    #[test]
    fn test_remove_unknown_leg() {
        let mut strategy = bull_call_spread();
        let err = strategy.remove(&LegId::from("missing")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LegNotFound);
        assert_eq!(strategy.len(), 2);
    }

    #[test]
    fn test_update_applies_parse_policy() {
        let mut strategy = bull_call_spread();
        let id = LegId::from("long");

        strategy.update(&id, LegField::Quantity("abc")).unwrap();
        strategy.update(&id, LegField::Strike("")).unwrap();
        strategy.update(&id, LegField::Premium("3.25")).unwrap();
        let leg = strategy.update(&id, LegField::OptionType(OptionType::Put)).unwrap();

        assert_eq!(leg.quantity, 1);
        assert_eq!(leg.strike, 0.0);
        assert_eq!(leg.premium, 3.25);
        assert_eq!(leg.option_type, OptionType::Put);
    }

    #[test]
    fn test_net_premium_bull_call_spread() {
        assert!((bull_call_spread().net_premium() - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_strike_bounds_and_exposure() {
        let strategy = bull_call_spread();
        assert_eq!(strategy.strike_bounds(), (100.0, 105.0));
        assert_eq!(strategy.net_call_exposure(), 0.0);
        assert!(strategy.has_short_leg());
    }

    #[test]
    fn test_serde_rejects_empty_list() {
        let result: Result<Strategy, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
