//! Covering relations and irreducibles derived from a partial order.

use serde::{Deserialize, Serialize};

/// A partial order on `count` elements stored as a dense `leq` matrix.
///
/// Both lattices derive their covering relation and irreducible sets through
/// this one structure. The elements themselves stay outside: the order works
/// on indices into a flat element list, never on pointer graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRelation {
    count: usize,
    leq: Vec<bool>,
}

impl OrderRelation {
    /// Builds the order from a precomputed row-major `leq` matrix.
    pub fn from_matrix(count: usize, leq: Vec<bool>) -> Self {
        assert_eq!(leq.len(), count * count, "leq matrix shape");
        Self { count, leq }
    }

    /// Returns the number of ordered elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns whether element `x` lies below or equals element `y`.
    pub fn leq(&self, x: usize, y: usize) -> bool {
        self.leq[x * self.count + y]
    }

    /// Returns whether element `x` lies strictly below element `y`.
    pub fn lt(&self, x: usize, y: usize) -> bool {
        x != y && self.leq(x, y)
    }

    /// Returns the covering pairs `(lower, upper)` of the order.
    ///
    /// `(x, y)` is retained when `x < y` and no `z` satisfies `x < z < y`.
    pub fn covering_pairs(&self) -> Vec<(usize, usize)> {
        let mut covers = Vec::new();
        for x in 0..self.count {
            for y in 0..self.count {
                if !self.lt(x, y) {
                    continue;
                }
                let skipped = (0..self.count).any(|z| self.lt(x, z) && self.lt(z, y));
                if !skipped {
                    covers.push((x, y));
                }
            }
        }
        covers
    }

    /// Returns the elements covered by `x`, in ascending order.
    pub fn lower_covers(&self, x: usize, covers: &[(usize, usize)]) -> Vec<usize> {
        covers
            .iter()
            .filter(|(_, upper)| *upper == x)
            .map(|(lower, _)| *lower)
            .collect()
    }

    /// Returns the elements covering `x`, in ascending order.
    pub fn upper_covers(&self, x: usize, covers: &[(usize, usize)]) -> Vec<usize> {
        covers
            .iter()
            .filter(|(lower, _)| *lower == x)
            .map(|(_, upper)| *upper)
            .collect()
    }

    /// Returns the elements with exactly one lower cover.
    ///
    /// In a finite lattice these are exactly the elements not expressible as
    /// the join of strictly smaller elements.
    pub fn join_irreducibles(&self, covers: &[(usize, usize)]) -> Vec<usize> {
        (0..self.count)
            .filter(|&x| self.lower_covers(x, covers).len() == 1)
            .collect()
    }

    /// Returns the elements with exactly one upper cover.
    pub fn meet_irreducibles(&self, covers: &[(usize, usize)]) -> Vec<usize> {
        (0..self.count)
            .filter(|&x| self.upper_covers(x, covers).len() == 1)
            .collect()
    }
}
