//! Sources of sites for trial drivers to open.

use rand::{Rng, seq::SliceRandom};

use crate::site::Site;

/// Supplies the next site a trial should open.
///
/// Sources may repeat sites; opening an already-open site is a no-op for the
/// grid. Returning `None` signals that the source has run out.
pub trait SiteSource {
    /// Returns the next site to open on a `size`x`size` grid.
    fn next_site(&mut self, size: usize) -> Option<Site>;
}

/// Draws every coordinate independently and uniformly from `[0, size)`.
///
/// Sites repeat, so a trial typically issues more draws than it opens sites.
///
/// # Examples
/// ```
/// use percolation_core::{SiteSource, UniformSites};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut sites = UniformSites::new(SmallRng::seed_from_u64(1));
/// let site = sites.next_site(4).expect("uniform sources never run out");
/// assert!(site.is_within(4));
/// assert!(sites.next_site(0).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct UniformSites<R> {
    rng: R,
}

impl<R: Rng> UniformSites<R> {
    /// Wraps `rng` as a uniform site source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SiteSource for UniformSites<R> {
    fn next_site(&mut self, size: usize) -> Option<Site> {
        if size == 0 {
            return None;
        }
        let row = self.rng.gen_range(0..size);
        let col = self.rng.gen_range(0..size);
        Some(Site::new(row, col))
    }
}

/// Visits every site of a grid exactly once in random order.
///
/// # Examples
/// ```
/// use percolation_core::{ShuffledSites, SiteSource};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(9);
/// let mut sites = ShuffledSites::new(2, &mut rng);
/// let mut drawn = Vec::new();
/// while let Some(site) = sites.next_site(2) {
///     drawn.push(site);
/// }
/// assert_eq!(drawn.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct ShuffledSites {
    remaining: Vec<Site>,
}

impl ShuffledSites {
    /// Shuffles all sites of a `size`x`size` grid with `rng`.
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut remaining: Vec<Site> = (0..size)
            .flat_map(|row| (0..size).map(move |col| Site::new(row, col)))
            .collect();
        remaining.shuffle(rng);
        Self { remaining }
    }

    /// Number of sites not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl SiteSource for ShuffledSites {
    fn next_site(&mut self, _size: usize) -> Option<Site> {
        self.remaining.pop()
    }
}

/// Replays a fixed sequence of sites.
///
/// # Examples
/// ```
/// use percolation_core::{ScriptedSites, Site, SiteSource};
///
/// let mut sites = ScriptedSites::new([Site::new(0, 0), Site::new(1, 0)]);
/// assert_eq!(sites.next_site(2), Some(Site::new(0, 0)));
/// assert_eq!(sites.next_site(2), Some(Site::new(1, 0)));
/// assert_eq!(sites.next_site(2), None);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedSites {
    sites: std::vec::IntoIter<Site>,
}

impl ScriptedSites {
    /// Builds a source that yields `sites` in order.
    pub fn new<I>(sites: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Site>,
    {
        let sites: Vec<Site> = sites.into_iter().map(Into::into).collect();
        Self {
            sites: sites.into_iter(),
        }
    }
}

impl SiteSource for ScriptedSites {
    fn next_site(&mut self, _size: usize) -> Option<Site> {
        self.sites.next()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(10)]
    fn uniform_sites_stay_in_bounds(#[case] size: usize) {
        let mut sites = UniformSites::new(SmallRng::seed_from_u64(11));
        for _ in 0..500 {
            let site = sites.next_site(size).expect("uniform sources never run out");
            assert!(site.is_within(size), "{site} escaped a {size}x{size} grid");
        }
    }

    #[test]
    fn uniform_sites_cover_small_grids() {
        let mut sites = UniformSites::new(SmallRng::seed_from_u64(5));
        let seen: HashSet<Site> = (0..400).filter_map(|_| sites.next_site(3)).collect();
        assert_eq!(seen.len(), 9);
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(9)]
    fn shuffled_sites_are_a_permutation(#[case] size: usize) {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut sites = ShuffledSites::new(size, &mut rng);
        assert_eq!(sites.remaining(), size * size);

        let mut seen = HashSet::new();
        while let Some(site) = sites.next_site(size) {
            assert!(site.is_within(size));
            assert!(seen.insert(site), "{site} was drawn twice");
        }
        assert_eq!(seen.len(), size * size);
        assert_eq!(sites.remaining(), 0);
    }

    #[test]
    fn shuffled_sites_depend_on_seed() {
        let draw = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut sites = ShuffledSites::new(8, &mut rng);
            std::iter::from_fn(|| sites.next_site(8)).collect::<Vec<_>>()
        };
        assert_eq!(draw(1), draw(1));
        assert_ne!(draw(1), draw(2));
    }
}
