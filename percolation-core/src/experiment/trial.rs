//! Single-trial driver: open sites until the grid percolates.

use crate::{
    error::{ExperimentError, Result},
    percolation::Percolation,
};

use super::sources::SiteSource;

/// What a single trial observed when its grid first percolated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TrialOutcome {
    open_sites: usize,
    site_count: usize,
    attempts: usize,
}

impl TrialOutcome {
    /// Number of open sites at the moment the grid percolated.
    #[must_use]
    pub const fn open_sites(&self) -> usize {
        self.open_sites
    }

    /// Total number of sites on the grid.
    #[must_use]
    pub const fn site_count(&self) -> usize {
        self.site_count
    }

    /// Number of `open` calls issued, including repeats of open sites.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Fraction of the grid that was open when it percolated.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.open_sites as f64 / self.site_count as f64
    }
}

/// Opens sites drawn from `sites` until `grid` percolates.
///
/// The grid is polled before every draw, so a grid that already percolates
/// returns immediately without consuming the source.
///
/// # Errors
/// Returns [`ExperimentError::SourceExhausted`] when `sites` runs out first,
/// and [`ExperimentError::Grid`] when the source yields a site outside the
/// grid.
///
/// # Examples
/// ```
/// use percolation_core::{ConnectivityGrid, ScriptedSites, Site, run_trial};
///
/// let mut grid = ConnectivityGrid::new(2)?;
/// let mut sites = ScriptedSites::new([
///     Site::new(0, 0),
///     Site::new(0, 0),
///     Site::new(1, 1),
///     Site::new(1, 0),
///     Site::new(0, 1),
/// ]);
/// let outcome = run_trial(&mut grid, &mut sites)?;
/// assert_eq!(outcome.open_sites(), 3);
/// assert_eq!(outcome.attempts(), 4);
/// assert_eq!(outcome.threshold(), 0.75);
/// # Ok::<(), percolation_core::ExperimentError>(())
/// ```
pub fn run_trial<P, S>(grid: &mut P, sites: &mut S) -> Result<TrialOutcome>
where
    P: Percolation + ?Sized,
    S: SiteSource + ?Sized,
{
    let size = grid.size();
    let mut attempts = 0_usize;
    while !grid.percolates() {
        let Some(site) = sites.next_site(size) else {
            return Err(ExperimentError::SourceExhausted {
                opened: grid.number_of_open_sites(),
            });
        };
        grid.open(site.row(), site.col())?;
        attempts += 1;
    }

    Ok(TrialOutcome {
        open_sites: grid.number_of_open_sites(),
        site_count: grid.site_count(),
        attempts,
    })
}
