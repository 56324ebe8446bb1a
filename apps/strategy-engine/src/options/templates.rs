//! Strategy templates.
//!
//! Builds common multi-leg strategies around a center strike:
//! - Single legs: long call, long put
//! - Vertical spreads: bull call, bear put, bull put, bear call
//! - Volatility: long straddle, long strangle
//! - Neutral: iron condor, call butterfly
//!
//! Premiums are the Black-Scholes value under the supplied market
//! parameters, rounded to cents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market::MarketParams;
use crate::pricing::black_scholes_price;

use super::leg::OptionLeg;
use super::strategy::Strategy;
use super::types::{Direction, OptionType};

/// Errors from template construction.
#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    /// Invalid strike configuration.
    #[error("Invalid strike configuration: {message}")]
    InvalidStrikes {
        /// Error message.
        message: String,
    },

    /// Width must be positive for multi-strike templates.
    #[error("Invalid wing width: {width}")]
    InvalidWidth {
        /// Offending width.
        width: f64,
    },
}

/// Type of strategy template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTemplate {
    /// Long call at the center strike (bullish).
    LongCall,
    /// Long put at the center strike (bearish).
    LongPut,
    /// Long call at center, short call one width above (bullish debit).
    BullCallSpread,
    /// Long put at center, short put one width below (bearish debit).
    BearPutSpread,
    /// Short put at center, long put one width below (bullish credit).
    BullPutSpread,
    /// Short call at center, long call one width above (bearish credit).
    BearCallSpread,
    /// Long call and long put at center (volatility).
    LongStraddle,
    /// Long put one width below, long call one width above (volatility).
    LongStrangle,
    /// Short strangle one width out, long wings two widths out (neutral credit).
    IronCondor,
    /// Long 1 / short 2 / long 1 calls one width apart (neutral debit).
    CallButterfly,
}

impl StrategyTemplate {
    /// Every template, in menu order.
    pub const ALL: [Self; 10] = [
        Self::LongCall,
        Self::LongPut,
        Self::BullCallSpread,
        Self::BearPutSpread,
        Self::BullPutSpread,
        Self::BearCallSpread,
        Self::LongStraddle,
        Self::LongStrangle,
        Self::IronCondor,
        Self::CallButterfly,
    ];

    /// Whether the template places legs at strikes other than the center.
    #[must_use]
    pub const fn uses_width(&self) -> bool {
        !matches!(self, Self::LongCall | Self::LongPut | Self::LongStraddle)
    }

    /// Lowest strike offset in widths below center.
    const fn lowest_offset(&self) -> f64 {
        match self {
            Self::IronCondor => 2.0,
            Self::BearPutSpread | Self::BullPutSpread | Self::LongStrangle | Self::CallButterfly => {
                1.0
            }
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for StrategyTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LongCall => "Long Call",
            Self::LongPut => "Long Put",
            Self::BullCallSpread => "Bull Call Spread",
            Self::BearPutSpread => "Bear Put Spread",
            Self::BullPutSpread => "Bull Put Spread",
            Self::BearCallSpread => "Bear Call Spread",
            Self::LongStraddle => "Long Straddle",
            Self::LongStrangle => "Long Strangle",
            Self::IronCondor => "Iron Condor",
            Self::CallButterfly => "Call Butterfly",
        };
        write!(f, "{name}")
    }
}

/// Strike placement for a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Center strike.
    pub center_strike: f64,
    /// Distance between adjacent strikes.
    pub width: f64,
}

impl TemplateSpec {
    /// Create a spec.
    #[must_use]
    pub const fn new(center_strike: f64, width: f64) -> Self {
        Self {
            center_strike,
            width,
        }
    }
}

/// Build a strategy from a template.
///
/// # Errors
///
/// Returns an error if the center strike is not positive, the width is not
/// positive for a multi-strike template, or the lowest strike would fall to
/// zero or below.
pub fn build_template(
    template: StrategyTemplate,
    spec: TemplateSpec,
    params: &MarketParams,
) -> Result<Strategy, TemplateError> {
    let TemplateSpec {
        center_strike: c,
        width: w,
    } = spec;

    if !(c.is_finite() && c > 0.0) {
        return Err(TemplateError::InvalidStrikes {
            message: format!("center strike must be positive, got {c}"),
        });
    }
    if template.uses_width() && !(w.is_finite() && w > 0.0) {
        return Err(TemplateError::InvalidWidth { width: w });
    }
    let lowest = template.lowest_offset().mul_add(-w, c);
    if lowest <= 0.0 {
        return Err(TemplateError::InvalidStrikes {
            message: format!("{template} would place a strike at {lowest}"),
        });
    }

    let leg = |option_type, direction, strike: f64, quantity: u32| {
        let premium = estimate_premium(option_type, strike, params);
        OptionLeg::new(option_type, direction, strike, premium, quantity)
    };

    use Direction::{Long, Short};
    use OptionType::{Call, Put};

    let legs = match template {
        StrategyTemplate::LongCall => vec![leg(Call, Long, c, 1)],
        StrategyTemplate::LongPut => vec![leg(Put, Long, c, 1)],
        StrategyTemplate::BullCallSpread => vec![leg(Call, Long, c, 1), leg(Call, Short, c + w, 1)],
        StrategyTemplate::BearPutSpread => vec![leg(Put, Long, c, 1), leg(Put, Short, c - w, 1)],
        StrategyTemplate::BullPutSpread => vec![leg(Put, Short, c, 1), leg(Put, Long, c - w, 1)],
        StrategyTemplate::BearCallSpread => vec![leg(Call, Short, c, 1), leg(Call, Long, c + w, 1)],
        StrategyTemplate::LongStraddle => vec![leg(Call, Long, c, 1), leg(Put, Long, c, 1)],
        StrategyTemplate::LongStrangle => vec![leg(Put, Long, c - w, 1), leg(Call, Long, c + w, 1)],
        StrategyTemplate::IronCondor => vec![
            leg(Put, Long, 2.0f64.mul_add(-w, c), 1),
            leg(Put, Short, c - w, 1),
            leg(Call, Short, c + w, 1),
            leg(Call, Long, 2.0f64.mul_add(w, c), 1),
        ],
        StrategyTemplate::CallButterfly => vec![
            leg(Call, Long, c - w, 1),
            leg(Call, Short, c, 2),
            leg(Call, Long, c + w, 1),
        ],
    };

    tracing::debug!(%template, center = c, width = w, legs = legs.len(), "Built strategy template");

    Strategy::new(legs).map_err(|e| TemplateError::InvalidStrikes {
        message: e.to_string(),
    })
}

/// Model premium rounded to cents; undefined model values become 0.
fn estimate_premium(option_type: OptionType, strike: f64, params: &MarketParams) -> f64 {
    let value = black_scholes_price(
        option_type,
        strike,
        params.spot_price,
        params.implied_volatility,
        params.days(),
        params.risk_free_rate,
    );
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}
