//! Shared test utilities for `percolation-core`.

use std::collections::VecDeque;

use percolation_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::site::Site;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `PERCOLATION_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Breadth-first reference model of a percolation grid with virtual top and
/// bottom anchors.
///
/// Recomputes connectivity from scratch on every query, which makes it slow
/// but obviously correct; property tests compare the union-find grid against
/// it.
#[derive(Clone, Debug)]
pub(crate) struct FloodFillOracle {
    size: usize,
    open: Vec<bool>,
}

impl FloodFillOracle {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            open: vec![false; size * size],
        }
    }

    pub(crate) fn open(&mut self, site: Site) {
        let index = self.index(site);
        self.open[index] = true;
    }

    /// Returns the flags of every site sharing a component with the top
    /// anchor.
    ///
    /// The bottom anchor joins every open bottom-row site, so once the top
    /// reaches the bottom row every open bottom-row component is full too.
    pub(crate) fn full_sites(&self) -> Vec<bool> {
        let mut full = vec![false; self.open.len()];
        self.flood(&mut full, self.open_row_sites(0));
        if self.reaches_bottom(&full) {
            self.flood(&mut full, self.open_row_sites(self.size - 1));
        }
        full
    }

    fn open_row_sites(&self, row: usize) -> Vec<Site> {
        (0..self.size)
            .map(|col| Site::new(row, col))
            .filter(|site| self.open[self.index(*site)])
            .collect()
    }

    fn flood(&self, full: &mut [bool], seeds: Vec<Site>) {
        let mut queue = VecDeque::new();
        for site in seeds {
            let index = self.index(site);
            if !full[index] {
                full[index] = true;
                queue.push_back(site);
            }
        }

        while let Some(site) = queue.pop_front() {
            for neighbour in site.neighbours(self.size) {
                let index = self.index(neighbour);
                if self.open[index] && !full[index] {
                    full[index] = true;
                    queue.push_back(neighbour);
                }
            }
        }
    }

    fn reaches_bottom(&self, full: &[bool]) -> bool {
        let last_row = (self.size - 1) * self.size;
        full[last_row..].iter().any(|&flag| flag)
    }

    fn index(&self, site: Site) -> usize {
        site.row() * self.size + site.col()
    }

    pub(crate) fn percolates(&self) -> bool {
        let mut from_top = vec![false; self.open.len()];
        self.flood(&mut from_top, self.open_row_sites(0));
        self.reaches_bottom(&from_top)
    }
}
