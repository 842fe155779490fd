//! Monte-Carlo estimation of the percolation threshold.
//!
//! Runs independent trials, each on a private [`ConnectivityGrid`] with its
//! own deterministically seeded RNG, and aggregates the open-site counts at
//! which the grids first percolated.

use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument};

#[cfg(not(feature = "parallel"))]
use crate::error::ExperimentError;
use crate::{error::Result, grid::ConnectivityGrid};

use super::{
    builder::{ExecutionStrategy, SiteOrder},
    rng::mix_trial_seed,
    sources::{ShuffledSites, UniformSites},
    stats::ThresholdStats,
    trial::{TrialOutcome, run_trial},
};

/// A validated percolation experiment, ready to run.
///
/// # Examples
/// ```
/// use percolation_core::ExperimentBuilder;
///
/// let experiment = ExperimentBuilder::new()
///     .with_grid_size(10)
///     .with_trials(5)
///     .with_seed(3)
///     .build()
///     .expect("configuration is valid");
/// let report = experiment.run().expect("trials must complete");
/// assert_eq!(report.outcomes().len(), 5);
/// assert!(report.mean_fraction() > 0.0 && report.mean_fraction() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    grid_size: usize,
    trials: NonZeroUsize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    site_order: SiteOrder,
}

impl Experiment {
    pub(crate) fn new(
        grid_size: usize,
        trials: NonZeroUsize,
        seed: u64,
        execution_strategy: ExecutionStrategy,
        site_order: SiteOrder,
    ) -> Self {
        Self {
            grid_size,
            trials,
            seed,
            execution_strategy,
            site_order,
        }
    }

    /// Side length of every trial's grid.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of independent trials.
    #[must_use]
    pub fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Base seed from which every trial seed is derived.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Execution strategy used by [`run`](Self::run).
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Order in which trials draw sites.
    #[must_use]
    pub fn site_order(&self) -> SiteOrder {
        self.site_order
    }

    /// Runs every trial and aggregates the results.
    ///
    /// # Errors
    /// Returns [`crate::ExperimentError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature, and propagates any trial failure.
    #[instrument(
        name = "experiment.run",
        err,
        skip(self),
        fields(
            size = self.grid_size,
            trials = self.trials.get(),
            strategy = ?self.execution_strategy,
            order = ?self.site_order,
        ),
    )]
    pub fn run(&self) -> Result<ExperimentReport> {
        let started = Instant::now();
        let outcomes = match self.execution_strategy {
            ExecutionStrategy::Sequential => self.run_sequential()?,
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => self.run_parallel()?,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => self.run_sequential()?,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(ExperimentError::BackendUnavailable {
                    requested: ExecutionStrategy::Parallel,
                });
            }
        };

        let samples: Vec<f64> = outcomes
            .iter()
            .map(|outcome| outcome.open_sites() as f64)
            .collect();
        let stats = ThresholdStats::from_samples(&samples)?;
        let elapsed = started.elapsed();
        info!(
            mean = stats.mean(),
            stddev = stats.stddev(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "experiment completed"
        );

        Ok(ExperimentReport {
            grid_size: self.grid_size,
            seed: self.seed,
            outcomes,
            stats,
            elapsed,
        })
    }

    /// Runs the trial with index `trial` in isolation.
    ///
    /// The outcome matches the one [`run`](Self::run) records at the same
    /// index.
    ///
    /// # Errors
    /// Propagates any grid or site-source failure.
    pub fn run_trial(&self, trial: usize) -> Result<TrialOutcome> {
        let mut rng = SmallRng::seed_from_u64(mix_trial_seed(self.seed, trial));
        let mut grid = ConnectivityGrid::new(self.grid_size)?;
        let outcome = match self.site_order {
            SiteOrder::Uniform => run_trial(&mut grid, &mut UniformSites::new(rng))?,
            SiteOrder::Shuffled => {
                run_trial(&mut grid, &mut ShuffledSites::new(self.grid_size, &mut rng))?
            }
        };
        debug!(
            trial,
            open_sites = outcome.open_sites(),
            attempts = outcome.attempts(),
            "trial completed"
        );
        Ok(outcome)
    }

    fn run_sequential(&self) -> Result<Vec<TrialOutcome>> {
        (0..self.trials.get())
            .map(|trial| self.run_trial(trial))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self) -> Result<Vec<TrialOutcome>> {
        use rayon::prelude::*;

        (0..self.trials.get())
            .into_par_iter()
            .map(|trial| self.run_trial(trial))
            .collect()
    }
}

/// Results of a completed [`Experiment`].
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    grid_size: usize,
    seed: u64,
    outcomes: Vec<TrialOutcome>,
    stats: ThresholdStats,
    elapsed: Duration,
}

impl ExperimentReport {
    /// Side length of the grids the trials ran on.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Base seed the trials were derived from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-trial outcomes in trial order.
    #[must_use]
    pub fn outcomes(&self) -> &[TrialOutcome] {
        &self.outcomes
    }

    /// Statistics over the open-site counts of every trial.
    #[must_use]
    pub fn stats(&self) -> &ThresholdStats {
        &self.stats
    }

    /// Wall-clock time spent running the trials.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Mean open-site count expressed as a fraction of the grid.
    #[must_use]
    pub fn mean_fraction(&self) -> f64 {
        self.stats.mean() / (self.grid_size * self.grid_size) as f64
    }
}
