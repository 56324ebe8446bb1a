//! Session state for an interactive front end.
//!
//! A [`Session`] owns the strategy being edited, the market parameters, the
//! expiry price and the sizing inputs. Each mutation takes `&mut self`, so
//! edits to one session are serialized by the borrow checker; analysis
//! borrows immutably and recomputes everything from scratch.
//!
//! # Example
//!
//! ```rust
//! use strategy_engine::config::Config;
//! use strategy_engine::options::LegField;
//! use strategy_engine::session::Session;
//!
//! let mut session = Session::new(Config::default());
//! let id = session.add_leg();
//! session.update_leg(&id, LegField::Strike("105")).unwrap();
//! session.update_leg(&id, LegField::Quantity("abc")).unwrap(); // -> 1
//!
//! let analysis = session.analyze();
//! assert_eq!(analysis.leg_greeks.len(), 2);
//! ```

use rust_decimal::Decimal;

use crate::analysis::{Analysis, analyze};
use crate::config::Config;
use crate::error::{EngineError, ErrorCode};
use crate::market::{MarketParams, market_params_for};
use crate::options::{
    LegField, LegId, OptionLeg, Strategy, StrategyTemplate, TemplateSpec, build_template,
    parse_price,
};
use crate::pricing::{ExpiryBreakdown, expiry_breakdown};
use crate::risk::SizingInput;

/// Initial expiry calculator price.
pub const DEFAULT_EXPIRY_PRICE: f64 = 100.0;

/// Mutable analysis state owned by the calling layer.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    strategy: Strategy,
    market: MarketParams,
    expiry_price: f64,
    sizing: SizingInput,
    symbol: Option<String>,
}

impl Session {
    /// Start a session with the default leg (long call, strike 100, premium 5).
    #[must_use]
    pub fn new(config: Config) -> Self {
        let market = MarketParams::from_config(&config.pricing);
        let sizing = SizingInput::from_config(&config.risk);
        Self {
            config,
            strategy: Strategy::default(),
            market,
            expiry_price: DEFAULT_EXPIRY_PRICE,
            sizing,
            symbol: None,
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current strategy.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Current market parameters.
    #[must_use]
    pub const fn market(&self) -> &MarketParams {
        &self.market
    }

    /// Current expiry calculator price.
    #[must_use]
    pub const fn expiry_price(&self) -> f64 {
        self.expiry_price
    }

    /// Current sizing inputs.
    #[must_use]
    pub const fn sizing(&self) -> &SizingInput {
        &self.sizing
    }

    /// Symbol last selected, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Append the default leg and return its identity.
    pub fn add_leg(&mut self) -> LegId {
        self.add_leg_with(OptionLeg::default())
    }

    /// Append a leg and return its identity.
    pub fn add_leg_with(&mut self, leg: OptionLeg) -> LegId {
        let id = leg.id.clone();
        self.strategy.push(leg);
        tracing::debug!(leg_id = %id, legs = self.strategy.len(), "Leg added");
        id
    }

    /// Remove a leg. Returns `Ok(false)` when it is the only leg left.
    ///
    /// # Errors
    ///
    /// Returns `LEG_NOT_FOUND` if no leg has this identity.
    pub fn remove_leg(&mut self, id: &LegId) -> Result<bool, EngineError> {
        self.strategy.remove(id)
    }

    /// Edit one field of a leg with the parse-or-default policy.
    ///
    /// # Errors
    ///
    /// Returns `LEG_NOT_FOUND` if no leg has this identity.
    pub fn update_leg(&mut self, id: &LegId, field: LegField<'_>) -> Result<&OptionLeg, EngineError> {
        self.strategy.update(id, field)
    }

    /// Replace the market parameters.
    pub fn set_market_params(&mut self, market: MarketParams) {
        self.market = market;
    }

    /// Pre-populate spot and IV from the ticker table.
    ///
    /// # Errors
    ///
    /// Returns `UNKNOWN_SYMBOL` if the symbol is not in the table; the
    /// session is unchanged.
    pub fn select_symbol(&mut self, symbol: &str) -> Result<&MarketParams, EngineError> {
        self.market = market_params_for(symbol, &self.market)?;
        self.symbol = Some(symbol.trim().to_ascii_uppercase());
        tracing::debug!(
            symbol = %symbol,
            spot = self.market.spot_price,
            iv = self.market.implied_volatility,
            "Symbol selected"
        );
        Ok(&self.market)
    }

    /// Set the expiry calculator price from text (invalid -> 0).
    pub fn set_expiry_price(&mut self, text: &str) -> f64 {
        self.expiry_price = parse_price(text);
        self.expiry_price
    }

    /// Set the account size and risk percent.
    pub fn set_sizing(&mut self, account_size: Decimal, risk_percent: Decimal) {
        self.sizing = SizingInput::new(account_size, risk_percent);
    }

    /// Replace the strategy with a template around `center_strike`.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_TEMPLATE` if the template cannot be built; the
    /// current strategy is kept.
    pub fn load_template(
        &mut self,
        template: StrategyTemplate,
        center_strike: f64,
        width: f64,
    ) -> Result<&Strategy, EngineError> {
        let strategy = build_template(template, TemplateSpec::new(center_strike, width), &self.market)
            .map_err(|e| {
                EngineError::new(ErrorCode::InvalidTemplate, e.to_string())
                    .with_context("template", template.to_string())
            })?;
        self.strategy = strategy;
        Ok(&self.strategy)
    }

    /// Full analysis of the current state.
    #[must_use]
    pub fn analyze(&self) -> Analysis {
        analyze(
            &self.strategy,
            &self.market,
            Some(self.expiry_price),
            &self.sizing,
            &self.config,
        )
    }

    /// Expiry breakdown at the current expiry price.
    #[must_use]
    pub fn expiry_breakdown(&self) -> ExpiryBreakdown {
        expiry_breakdown(&self.strategy, self.expiry_price)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
