//! Option leg type.
//!
//! A leg is one option position inside a strategy. Its identity is a stable
//! key used only to address the leg for edits and removal; it never takes
//! part in valuation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::parse::{sanitize_price, sanitize_quantity};
use super::types::{Direction, OptionType};

/// Unique identifier for a leg within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegId(String);

impl LegId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a new unique identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LegId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LegId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single option leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Stable identity (addressing only).
    #[serde(default)]
    pub id: LegId,
    /// Call or put.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Premium paid (long) or received (short) per unit.
    pub premium: f64,
    /// Long or short.
    pub direction: Direction,
    /// Unit multiplier (>= 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl OptionLeg {
    /// Create a leg with a freshly generated identity.
    ///
    /// Out-of-policy values are coerced (quantity 0 becomes 1, negative or
    /// non-finite strike/premium become 0).
    #[must_use]
    pub fn new(
        option_type: OptionType,
        direction: Direction,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: LegId::generate(),
            option_type,
            strike: sanitize_price(strike),
            premium: sanitize_price(premium),
            direction,
            quantity: sanitize_quantity(quantity),
        }
    }

    /// Long call shorthand.
    #[must_use]
    pub fn long_call(strike: f64, premium: f64) -> Self {
        Self::new(OptionType::Call, Direction::Long, strike, premium, 1)
    }

    /// Short call shorthand.
    #[must_use]
    pub fn short_call(strike: f64, premium: f64) -> Self {
        Self::new(OptionType::Call, Direction::Short, strike, premium, 1)
    }

    /// Long put shorthand.
    #[must_use]
    pub fn long_put(strike: f64, premium: f64) -> Self {
        Self::new(OptionType::Put, Direction::Long, strike, premium, 1)
    }

    /// Short put shorthand.
    #[must_use]
    pub fn short_put(strike: f64, premium: f64) -> Self {
        Self::new(OptionType::Put, Direction::Short, strike, premium, 1)
    }

    /// Replace the quantity (policy applied).
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = sanitize_quantity(quantity);
        self
    }

    /// Replace the identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LegId>) -> Self {
        self.id = id.into();
        self
    }

    /// Signed quantity: positive for long, negative for short.
    #[must_use]
    pub fn signed_quantity(&self) -> f64 {
        self.direction.sign() * f64::from(self.quantity)
    }

    /// Net premium cash flow at entry (positive = credit, negative = debit).
    #[must_use]
    pub fn net_premium(&self) -> f64 {
        -self.direction.sign() * self.premium * f64::from(self.quantity)
    }

    /// Display label, e.g. `"Long Call $100"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} ${}", self.direction, self.option_type, self.strike)
    }

    /// Copy with strike/premium/quantity run through the input policy.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.strike = sanitize_price(self.strike);
        self.premium = sanitize_price(self.premium);
        self.quantity = sanitize_quantity(self.quantity);
        self
    }
}

impl Default for OptionLeg {
    /// The leg a fresh session starts with: long 1 call, strike 100, premium 5.
    fn default() -> Self {
        Self::long_call(100.0, 5.0)
    }
}
