//! Benchmark setup error type.
//!
//! Lets setup helpers propagate library failures with `?` instead of
//! panicking halfway through a measurement.

use percolation_core::{ExperimentError, GridError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Grid construction or a grid operation failed.
    #[error("grid operation failed: {0}")]
    Grid(#[from] GridError),
    /// Experiment configuration, a trial, or statistics failed.
    #[error("experiment failed: {0}")]
    Experiment(#[from] ExperimentError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
