//! Site coordinates and grid adjacency.

use std::fmt;

/// Row/column offsets of the four grid-adjacent neighbours: up, down, left,
/// right. There is no wraparound.
const NEIGHBOUR_DELTAS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A zero-based `(row, col)` position on a square grid.
///
/// # Examples
/// ```
/// use percolation_core::Site;
///
/// let site = Site::new(2, 3);
/// assert_eq!(site.row(), 2);
/// assert_eq!(site.col(), 3);
/// assert_eq!(site.to_string(), "(2, 3)");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Site {
    row: usize,
    col: usize,
}

impl Site {
    /// Creates a site at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row index, counted from the top.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Column index, counted from the left.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Reports whether the site lies inside an `size`x`size` grid.
    #[must_use]
    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Iterates over the in-bounds grid neighbours of this site.
    ///
    /// Edge and corner sites yield fewer than four neighbours.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::Site;
    ///
    /// let corner: Vec<Site> = Site::new(0, 0).neighbours(3).collect();
    /// assert_eq!(corner, vec![Site::new(1, 0), Site::new(0, 1)]);
    /// assert_eq!(Site::new(1, 1).neighbours(3).count(), 4);
    /// ```
    pub fn neighbours(self, size: usize) -> impl Iterator<Item = Self> {
        NEIGHBOUR_DELTAS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            let neighbour = Self::new(row, col);
            neighbour.is_within(size).then_some(neighbour)
        })
    }
}

impl From<(usize, usize)> for Site {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
