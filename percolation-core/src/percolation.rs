//! Query and mutation contract shared by percolation grids.

use crate::error::GridResult;

/// A square grid of sites that can be opened one at a time and queried for
/// top-to-bottom connectivity.
///
/// Trial drivers are written against this trait so they work with any grid
/// implementation, including scripted doubles in tests.
///
/// # Examples
/// ```
/// use percolation_core::{ConnectivityGrid, Percolation};
///
/// fn open_column<P: Percolation>(grid: &mut P, col: usize) -> percolation_core::GridResult<()> {
///     for row in 0..grid.size() {
///         grid.open(row, col)?;
///     }
///     Ok(())
/// }
///
/// let mut grid = ConnectivityGrid::new(4)?;
/// open_column(&mut grid, 2)?;
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 4);
/// # Ok::<(), percolation_core::GridError>(())
/// ```
pub trait Percolation {
    /// Side length of the grid.
    fn size(&self) -> usize;

    /// Opens the site at `(row, col)` if it is not open already.
    ///
    /// # Errors
    /// Returns [`crate::GridError::SiteOutOfBounds`] when either coordinate
    /// falls outside `[0, size)`.
    fn open(&mut self, row: usize, col: usize) -> GridResult<()>;

    /// Reports whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// Returns [`crate::GridError::SiteOutOfBounds`] for out-of-range
    /// coordinates.
    fn is_open(&self, row: usize, col: usize) -> GridResult<bool>;

    /// Reports whether the site at `(row, col)` is open and connected to the
    /// virtual top anchor.
    ///
    /// After the grid percolates, open bottom-row sites are connected through
    /// the bottom anchor and count as full.
    ///
    /// # Errors
    /// Returns [`crate::GridError::SiteOutOfBounds`] for out-of-range
    /// coordinates.
    fn is_full(&mut self, row: usize, col: usize) -> GridResult<bool>;

    /// Number of distinct sites opened so far.
    fn number_of_open_sites(&self) -> usize;

    /// Reports whether an open path joins the top row to the bottom row.
    fn percolates(&mut self) -> bool;

    /// Total number of sites on the grid.
    fn site_count(&self) -> usize {
        self.size() * self.size()
    }
}
