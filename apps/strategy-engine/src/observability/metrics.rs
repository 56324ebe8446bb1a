//! Engine metrics recorded through the `metrics` facade.
//!
//! No exporter is installed here. The embedding application installs a
//! recorder (Prometheus, statsd, a test recorder); without one every call
//! is a no-op.
//!
//! # Example
//!
//! ```ignore
//! use strategy_engine::observability::record_sweep_generation;
//!
//! record_sweep_generation(101);
//! ```

use metrics::{counter, histogram};

// ============================================================================
// Engine Metrics
// ============================================================================

/// Record a sweep generation.
///
/// # Arguments
///
/// * `points` - Number of price points in the generated sweep
pub fn record_sweep_generation(points: usize) {
    counter!("sweep_generations_total").increment(1);
    histogram!("sweep_points").record(points as f64);
}

/// Record a Black-Scholes Greeks computation for one leg.
///
/// # Arguments
///
/// * `option_type` - `"call"` or `"put"`
pub fn record_greeks_computation(option_type: &str) {
    counter!(
        "greeks_computations_total",
        "option_type" => option_type.to_string()
    )
    .increment(1);
}

/// Record a full strategy analysis.
pub fn record_analysis_run() {
    counter!("analysis_runs_total").increment(1);
}

/// Record a risk warning raised by an analysis.
///
/// # Arguments
///
/// * `warning` - Warning code (e.g., `"UNDEFINED_RISK"`)
pub fn record_risk_warning(warning: &str) {
    counter!(
        "risk_warnings_total",
        "warning" => warning.to_string()
    )
    .increment(1);
}
