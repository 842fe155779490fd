//! Builder utilities for configuring percolation experiments.
//!
//! Exposes the execution strategy and site order selection surface and the
//! validation performed before constructing [`Experiment`] instances.

use std::num::NonZeroUsize;

use crate::{
    error::{ExperimentError, Result},
    grid::ConnectivityGrid,
};

use super::runner::Experiment;

const DEFAULT_GRID_SIZE: usize = 200;
const DEFAULT_TRIALS: usize = 30;
const MIN_TRIALS: usize = 2;

/// Indicates how [`Experiment::run`] schedules its trials.
///
/// `Auto` runs trials on the rayon thread pool when the `parallel` feature is
/// enabled and falls back to sequential execution otherwise. Samples do not
/// depend on the strategy.
///
/// # Examples
/// ```
/// use percolation_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Let the library pick the fastest available backend.
    #[default]
    Auto,
    /// Run every trial on the calling thread.
    Sequential,
    /// Run trials on the rayon thread pool.
    Parallel,
}

/// Order in which a trial draws sites to open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SiteOrder {
    /// Independent uniform draws; sites may repeat.
    #[default]
    Uniform,
    /// A random permutation of the grid; every draw opens a new site.
    Shuffled,
}

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use percolation_core::{ExecutionStrategy, ExperimentBuilder, SiteOrder};
///
/// let experiment = ExperimentBuilder::new()
///     .with_grid_size(20)
///     .with_trials(10)
///     .with_seed(7)
///     .with_site_order(SiteOrder::Shuffled)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(experiment.grid_size(), 20);
/// assert_eq!(experiment.trials().get(), 10);
/// assert_eq!(experiment.seed(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentBuilder {
    grid_size: usize,
    trials: usize,
    seed: Option<u64>,
    execution_strategy: ExecutionStrategy,
    site_order: SiteOrder,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            trials: DEFAULT_TRIALS,
            seed: None,
            execution_strategy: ExecutionStrategy::Auto,
            site_order: SiteOrder::Uniform,
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ExecutionStrategy, ExperimentBuilder, SiteOrder};
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.grid_size(), 200);
    /// assert_eq!(builder.trials(), 30);
    /// assert_eq!(builder.seed(), None);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.site_order(), SiteOrder::Uniform);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the side length of every trial's grid.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Returns the configured grid side length.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Overrides the number of independent trials.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Fixes the base seed so runs are reproducible.
    ///
    /// Without a seed, [`build`](Self::build) draws one from the thread RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the execution strategy used when running the experiment.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Sets the order in which trials draw sites.
    #[must_use]
    pub fn with_site_order(mut self, order: SiteOrder) -> Self {
        self.site_order = order;
        self
    }

    /// Returns the configured site order.
    #[must_use]
    pub fn site_order(&self) -> SiteOrder {
        self.site_order
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`ExperimentError::Grid`] when the grid size is invalid and
    /// [`ExperimentError::TooFewTrials`] when fewer than two trials are
    /// requested.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ExperimentBuilder, ExperimentError};
    ///
    /// let err = ExperimentBuilder::new()
    ///     .with_trials(1)
    ///     .build()
    ///     .expect_err("a single trial cannot estimate a deviation");
    /// assert_eq!(err, ExperimentError::TooFewTrials { got: 1 });
    /// ```
    pub fn build(self) -> Result<Experiment> {
        ConnectivityGrid::checked_site_count(self.grid_size)?;
        let trials = NonZeroUsize::new(self.trials)
            .filter(|trials| trials.get() >= MIN_TRIALS)
            .ok_or(ExperimentError::TooFewTrials { got: self.trials })?;
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(Experiment::new(
            self.grid_size,
            trials,
            seed,
            self.execution_strategy,
            self.site_order,
        ))
    }
}
