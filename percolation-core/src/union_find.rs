//! Union-find (disjoint set union) forest backing [`crate::ConnectivityGrid`].
//!
//! The grid assigns every site a dense node id and reserves two extra ids for
//! the virtual top and bottom anchors. This module tracks component
//! membership over those ids with path compression and union-by-size. Both
//! tables are sized once at construction and never reallocate.

#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    #[cfg(test)]
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Allocates `n` singleton nodes, or `None` when the tables cannot be
    /// reserved.
    pub(crate) fn try_new(n: usize) -> Option<Self> {
        let mut parent = Vec::new();
        parent.try_reserve_exact(n).ok()?;
        parent.extend(0..n);
        let mut size = Vec::new();
        size.try_reserve_exact(n).ok()?;
        size.resize(n, 1);
        Some(Self { parent, size })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    pub(crate) fn connected(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Merges the components holding `left` and `right`.
    ///
    /// Returns `false` when both already share a root. The smaller tree is
    /// hung beneath the larger one.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        if self.size[left] < self.size[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        self.size[left] += self.size[right];
        true
    }

    #[cfg(test)]
    pub(crate) fn component_size(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.size[root]
    }
}
