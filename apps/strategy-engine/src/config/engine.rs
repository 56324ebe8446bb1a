//! Sweep and breakeven configuration for the calculation engine.

use serde::{Deserialize, Serialize};

/// How far the sweep extends beyond the outermost strikes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanPolicy {
    /// Pad by the strike range; use `fallback` when every leg shares one strike.
    Fixed {
        /// Padding used for a zero strike range.
        #[serde(default = "default_fixed_fallback")]
        fallback: f64,
    },
    /// Pad by `ratio` times the strike range, never less than `minimum`.
    Proportional {
        /// Fraction of the strike range.
        #[serde(default = "default_ratio")]
        ratio: f64,
        /// Lower bound on the padding.
        #[serde(default = "default_minimum")]
        minimum: f64,
    },
}

impl Default for SpanPolicy {
    fn default() -> Self {
        Self::Fixed {
            fallback: default_fixed_fallback(),
        }
    }
}

/// How a zero crossing between two sweep points is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakevenMode {
    /// Price of the later point of the bracketing pair.
    #[default]
    GridPoint,
    /// Linear zero between the two bracketing points.
    Interpolated,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of equal steps across the sweep; produces `steps + 1` points.
    #[serde(default = "default_step_count")]
    pub sweep_step_count: u32,
    /// Padding policy beyond the strikes.
    #[serde(default)]
    pub span_policy: SpanPolicy,
    /// Breakeven reporting mode.
    #[serde(default)]
    pub breakeven_mode: BreakevenMode,
}

impl EngineConfig {
    /// Builder view: 100 steps, fixed fallback span of 50.
    #[must_use]
    pub const fn builder_view() -> Self {
        Self {
            sweep_step_count: 100,
            span_policy: SpanPolicy::Fixed { fallback: 50.0 },
            breakeven_mode: BreakevenMode::GridPoint,
        }
    }

    /// Live simulator: 200 steps, proportional span (0.3 x range, at least 30).
    #[must_use]
    pub const fn live_simulator() -> Self {
        Self {
            sweep_step_count: 200,
            span_policy: SpanPolicy::Proportional {
                ratio: 0.3,
                minimum: 30.0,
            },
            breakeven_mode: BreakevenMode::GridPoint,
        }
    }

    /// Same configuration with a different breakeven mode.
    #[must_use]
    pub const fn with_breakeven_mode(mut self, mode: BreakevenMode) -> Self {
        self.breakeven_mode = mode;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder_view()
    }
}

const fn default_step_count() -> u32 {
    100
}

const fn default_fixed_fallback() -> f64 {
    50.0
}

const fn default_ratio() -> f64 {
    0.3
}

const fn default_minimum() -> f64 {
    30.0
}
