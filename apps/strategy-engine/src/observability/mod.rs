//! Observability module for metrics and logging.

mod logging;
mod metrics;

pub use logging::{LoggingError, build_filter, init_logging};
pub use metrics::{
    record_analysis_run, record_greeks_computation, record_risk_warning, record_sweep_generation,
};
