//! Benchmark parameter types.
//!
//! Their `Display` output becomes the Criterion benchmark id.

use std::fmt;

use percolation_core::ExecutionStrategy;

/// Parameters for a single-grid benchmark run.
#[derive(Clone, Debug)]
pub struct GridBenchParams {
    /// Side length of the grid.
    pub size: usize,
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.size)
    }
}

/// Parameters for a whole-experiment benchmark run.
#[derive(Clone, Debug)]
pub struct ExperimentBenchParams {
    /// Side length of each grid.
    pub size: usize,
    /// Number of trials per experiment.
    pub trials: usize,
    /// How trials are scheduled.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for ExperimentBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},T={},{:?}",
            self.size, self.trials, self.strategy
        )
    }
}
