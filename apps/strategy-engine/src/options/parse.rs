//! Parse-or-default policy for leg fields entered as text.
//!
//! Input fields never reject a value. Anything that fails to parse falls
//! back to a safe default at the point of mutation:
//!
//! - quantity: integer >= 1, default 1
//! - strike / premium / expiry price: non-negative real, default 0
//!
//! Parsing is prefix based, so `"2.7"` is quantity 2 and `"105abc"` is
//! strike 105, matching how a browser number field behaves.

use std::num::IntErrorKind;
use std::sync::OnceLock;

use regex::Regex;

/// Default quantity when the input is not a positive integer.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Default price when the input is not a non-negative real.
pub const DEFAULT_PRICE: f64 = 0.0;

#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn integer_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("integer prefix regex is valid"))
}

#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn real_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("real prefix regex is valid")
    })
}

/// Parse a quantity, defaulting to 1 for anything that is not an integer >= 1.
///
/// Positive integers too large for `u32` saturate to `u32::MAX`.
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    let Some(prefix) = integer_prefix().find(input.trim()) else {
        return DEFAULT_QUANTITY;
    };
    match prefix.as_str().parse::<u32>() {
        Ok(0) => DEFAULT_QUANTITY,
        Ok(quantity) => quantity,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => DEFAULT_QUANTITY,
    }
}

/// Parse a strike, premium or price, defaulting to 0 for anything that is
/// not a finite non-negative number.
#[must_use]
pub fn parse_price(input: &str) -> f64 {
    real_prefix()
        .find(input.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(DEFAULT_PRICE)
}

/// Clamp an already-numeric quantity to the policy range.
#[must_use]
pub const fn sanitize_quantity(quantity: u32) -> u32 {
    if quantity == 0 { DEFAULT_QUANTITY } else { quantity }
}

/// Clamp an already-numeric price to the policy range.
#[must_use]
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price >= 0.0 {
        price
    } else {
        DEFAULT_PRICE
    }
}
