//! Option legs and strategies.
//!
//! - `OptionLeg`: one position (type, strike, premium, direction, quantity)
//! - `Strategy`: the ordered, never-empty set of legs being analyzed
//! - parse-or-default policy for leg fields entered as text
//! - templates for common multi-leg strategies

mod leg;
mod parse;
mod strategy;
mod templates;
mod types;

pub use leg::{LegId, OptionLeg};
pub use parse::{
    DEFAULT_PRICE, DEFAULT_QUANTITY, parse_price, parse_quantity, sanitize_price,
    sanitize_quantity,
};
pub use strategy::{LegField, Strategy};
pub use templates::{StrategyTemplate, TemplateError, TemplateSpec, build_template};
pub use types::{Direction, OptionType};
