//! Error handling for the strategy engine.
//!
//! Valuation itself never fails: payoff, sweep, Greeks and risk metrics are
//! pure numeric functions whose degenerate inputs surface as NaN/infinity.
//! Errors only arise at the edges: addressing a leg that does not exist,
//! looking up an unknown symbol, building a template with impossible
//! strikes, or loading configuration.
//!
//! | Code | Usage |
//! |------|-------|
//! | `INVALID_REQUEST` | Malformed request or strategy document |
//! | `LEG_NOT_FOUND` | No leg with the given identity |
//! | `UNKNOWN_SYMBOL` | Symbol missing from the ticker table |
//! | `INVALID_TEMPLATE` | Template parameters cannot form a strategy |
//! | `INVALID_CONFIG` | Configuration failed to load or validate |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for the strategy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// No leg with the requested identity.
    LegNotFound,
    /// Symbol is not present in the ticker table.
    UnknownSymbol,
    /// Template parameters are inconsistent.
    InvalidTemplate,
    /// Configuration could not be loaded or validated.
    InvalidConfig,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::LegNotFound => "LEG_NOT_FOUND",
            Self::UnknownSymbol => "UNKNOWN_SYMBOL",
            Self::InvalidTemplate => "INVALID_TEMPLATE",
            Self::InvalidConfig => "INVALID_CONFIG",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An error with a code and key/value context.
#[derive(Debug, Error)]
pub struct EngineError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl EngineError {
    /// Create a new engine error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Shorthand for an unknown ticker symbol.
    #[must_use]
    pub fn unknown_symbol(symbol: &str) -> Self {
        Self::new(
            ErrorCode::UnknownSymbol,
            format!("symbol '{symbol}' is not in the ticker table"),
        )
        .with_context("symbol", symbol)
    }

    /// Shorthand for an invalid request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.context.is_empty() {
            let ctx: Vec<String> = self
                .context
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write!(f, " ({})", ctx.join(", "))?;
        }
        Ok(())
    }
}
