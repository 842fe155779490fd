//! Incremental grid-connectivity engine.
//!
//! [`ConnectivityGrid`] keeps one disjoint-set node per site plus two virtual
//! anchors. Every open site in the top row joins the top anchor and every open
//! site in the bottom row joins the bottom anchor, so fullness and percolation
//! each reduce to a single root comparison regardless of the grid size.

use tracing::{debug, instrument, trace};

use crate::{
    error::{GridError, GridResult},
    percolation::Percolation,
    site::Site,
    union_find::DisjointSet,
};

const MAX_ALLOCATION_BYTES: usize = isize::MAX.unsigned_abs();

/// An `n`x`n` grid of sites that tracks connectivity as sites are opened.
///
/// # Examples
/// ```
/// use percolation_core::ConnectivityGrid;
///
/// let mut grid = ConnectivityGrid::new(3)?;
/// grid.open(0, 0)?;
/// grid.open(1, 0)?;
/// assert!(!grid.percolates());
/// grid.open(2, 0)?;
/// assert!(grid.percolates());
/// assert!(grid.is_full(2, 0)?);
/// assert_eq!(grid.number_of_open_sites(), 3);
/// # Ok::<(), percolation_core::GridError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConnectivityGrid {
    size: usize,
    open: Vec<bool>,
    open_count: usize,
    forest: DisjointSet,
    top: usize,
    bottom: usize,
    percolation_logged: bool,
}

impl ConnectivityGrid {
    /// Creates a grid of `size`x`size` closed sites.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidSize`] when `size` is zero, when the forest
    /// for `size * size` sites plus the two anchors exceeds the largest
    /// possible allocation, or when its memory cannot be reserved.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ConnectivityGrid, GridError};
    ///
    /// let grid = ConnectivityGrid::new(5)?;
    /// assert_eq!(grid.size(), 5);
    /// assert_eq!(grid.number_of_open_sites(), 0);
    ///
    /// let err = ConnectivityGrid::new(0).expect_err("zero-sized grids are rejected");
    /// assert_eq!(err, GridError::InvalidSize { got: 0 });
    /// # Ok::<(), GridError>(())
    /// ```
    #[instrument(name = "grid.new", level = "debug", err)]
    pub fn new(size: usize) -> GridResult<Self> {
        let sites = Self::checked_site_count(size)?;
        let invalid = || GridError::InvalidSize { got: size };

        let mut open = Vec::new();
        open.try_reserve_exact(sites).map_err(|_| invalid())?;
        open.resize(sites, false);
        let forest = DisjointSet::try_new(sites + 2).ok_or_else(invalid)?;

        Ok(Self {
            size,
            open,
            open_count: 0,
            forest,
            top: sites,
            bottom: sites + 1,
            percolation_logged: false,
        })
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of real sites, excluding the virtual anchors.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.open.len()
    }

    /// Opens the site at `(row, col)`.
    ///
    /// Opening a site that is already open changes nothing. A newly opened
    /// site joins the top anchor when it sits in row 0, the bottom anchor when
    /// it sits in the last row, and every open orthogonal neighbour.
    ///
    /// # Errors
    /// Returns [`GridError::SiteOutOfBounds`] when either coordinate is at
    /// least [`size`](Self::size). The grid is left untouched.
    pub fn open(&mut self, row: usize, col: usize) -> GridResult<()> {
        let site = self.validate(row, col)?;
        let index = self.index_of(site);
        if self.open[index] {
            return Ok(());
        }

        self.open[index] = true;
        self.open_count += 1;
        trace!(%site, open_sites = self.open_count, "site opened");

        if row == 0 {
            self.forest.union(index, self.top);
        }
        if row == self.size - 1 {
            self.forest.union(index, self.bottom);
        }
        for neighbour in site.neighbours(self.size) {
            let neighbour_index = self.index_of(neighbour);
            if self.open[neighbour_index] {
                self.forest.union(index, neighbour_index);
            }
        }

        if !self.percolation_logged && self.forest.connected(self.top, self.bottom) {
            self.percolation_logged = true;
            debug!(
                size = self.size,
                open_sites = self.open_count,
                "grid percolates"
            );
        }
        Ok(())
    }

    /// Opens `site`; see [`open`](Self::open).
    ///
    /// # Errors
    /// Returns [`GridError::SiteOutOfBounds`] for sites outside the grid.
    pub fn open_site(&mut self, site: Site) -> GridResult<()> {
        self.open(site.row(), site.col())
    }

    /// Reports whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// Returns [`GridError::SiteOutOfBounds`] for out-of-range coordinates.
    pub fn is_open(&self, row: usize, col: usize) -> GridResult<bool> {
        let site = self.validate(row, col)?;
        Ok(self.open[self.index_of(site)])
    }

    /// Reports whether the site at `(row, col)` is open and shares a
    /// component with the top anchor.
    ///
    /// Closed sites are never full. Once the grid percolates the two anchors
    /// share a component, so every open bottom-row site reads as full even
    /// without its own open path to the top row.
    ///
    /// # Errors
    /// Returns [`GridError::SiteOutOfBounds`] for out-of-range coordinates.
    pub fn is_full(&mut self, row: usize, col: usize) -> GridResult<bool> {
        let site = self.validate(row, col)?;
        let index = self.index_of(site);
        if !self.open[index] {
            return Ok(false);
        }
        Ok(self.forest.connected(index, self.top))
    }

    /// Number of distinct sites opened so far.
    #[must_use]
    pub const fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Reports whether the top anchor and the bottom anchor share a
    /// component.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::ConnectivityGrid;
    ///
    /// let mut grid = ConnectivityGrid::new(1)?;
    /// assert!(!grid.percolates());
    /// grid.open(0, 0)?;
    /// assert!(grid.percolates());
    /// # Ok::<(), percolation_core::GridError>(())
    /// ```
    pub fn percolates(&mut self) -> bool {
        self.forest.connected(self.top, self.bottom)
    }

    /// Returns the site count of a `size`x`size` grid whose forest, anchors
    /// included, stays within the `isize::MAX` byte limit of a single
    /// allocation.
    pub(crate) fn checked_site_count(size: usize) -> GridResult<usize> {
        let fits = |sites: usize| {
            sites
                .checked_add(2)
                .and_then(|nodes| nodes.checked_mul(size_of::<usize>()))
                .is_some_and(|bytes| bytes <= MAX_ALLOCATION_BYTES)
        };
        size.checked_mul(size)
            .filter(|&sites| sites > 0 && fits(sites))
            .ok_or(GridError::InvalidSize { got: size })
    }

    fn validate(&self, row: usize, col: usize) -> GridResult<Site> {
        let site = Site::new(row, col);
        if site.is_within(self.size) {
            Ok(site)
        } else {
            Err(GridError::SiteOutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    const fn index_of(&self, site: Site) -> usize {
        site.row() * self.size + site.col()
    }
}

impl Percolation for ConnectivityGrid {
    fn size(&self) -> usize {
        self.size
    }

    fn open(&mut self, row: usize, col: usize) -> GridResult<()> {
        Self::open(self, row, col)
    }

    fn is_open(&self, row: usize, col: usize) -> GridResult<bool> {
        Self::is_open(self, row, col)
    }

    fn is_full(&mut self, row: usize, col: usize) -> GridResult<bool> {
        Self::is_full(self, row, col)
    }

    fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    fn percolates(&mut self) -> bool {
        Self::percolates(self)
    }

    fn site_count(&self) -> usize {
        self.open.len()
    }
}
