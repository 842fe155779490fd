//! Pre-generated site schedules.
//!
//! Benchmarks replay the same permutation on every iteration so the measured
//! time covers grid work only, not random number generation.

use percolation_core::{
    ConnectivityGrid, ScriptedSites, ShuffledSites, Site, SiteSource, TrialOutcome, run_trial,
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// A fixed opening order covering every site of a grid.
#[derive(Clone, Debug)]
pub struct SiteSchedule {
    size: usize,
    sites: Vec<Site>,
}

impl SiteSchedule {
    /// Draws a seeded random permutation of the `size`x`size` sites.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `size` is zero.
    pub fn shuffled(size: usize, seed: u64) -> Result<Self, BenchSetupError> {
        if size == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "grid size",
            });
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut source = ShuffledSites::new(size, &mut rng);
        let sites = std::iter::from_fn(|| source.next_site(size)).collect();
        Ok(Self { size, sites })
    }

    /// Side length of the grid the schedule covers.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of scheduled sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Reports whether the schedule is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Source that yields the scheduled sites in order.
    #[must_use]
    pub fn replay(&self) -> ScriptedSites {
        ScriptedSites::new(self.sites.iter().copied())
    }

    /// Opens scheduled sites on a fresh grid until it percolates.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Grid`] if the grid cannot be built and
    /// [`BenchSetupError::Experiment`] if the trial fails.
    pub fn open_until_percolates(&self) -> Result<TrialOutcome, BenchSetupError> {
        let mut grid = ConnectivityGrid::new(self.size)?;
        Ok(run_trial(&mut grid, &mut self.replay())?)
    }

    /// Opens every scheduled site and returns the resulting grid.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Grid`] if the grid cannot be built.
    pub fn open_all(&self) -> Result<ConnectivityGrid, BenchSetupError> {
        let mut grid = ConnectivityGrid::new(self.size)?;
        for &site in &self.sites {
            grid.open_site(site)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(32)]
    fn schedule_covers_every_site_once(#[case] size: usize) {
        let schedule = SiteSchedule::shuffled(size, 42).expect("size is positive");
        assert_eq!(schedule.len(), size * size);
        let mut sorted = schedule.sites.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), size * size);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = SiteSchedule::shuffled(0, 1).expect_err("zero is rejected");
        assert!(matches!(err, BenchSetupError::ZeroValue { .. }));
    }

    #[test]
    fn replay_percolates_before_schedule_runs_out() {
        let schedule = SiteSchedule::shuffled(16, 9).expect("size is positive");
        let outcome = schedule.open_until_percolates().expect("trial completes");
        assert!(outcome.open_sites() <= schedule.len());
        assert_eq!(outcome.attempts(), outcome.open_sites());
        let mut full = schedule.open_all().expect("grid builds");
        assert!(full.percolates());
        assert_eq!(full.number_of_open_sites(), schedule.len());
    }
}
