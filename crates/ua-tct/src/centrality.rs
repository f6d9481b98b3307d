//! Centrality testing via term-condition matrices.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ua_clo::tuple_closure_within;
use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};
use ua_part::Partition;

/// A binary relation over `[0, size)` that knows its own universe size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryRelation {
    size: usize,
    pairs: BTreeSet<(usize, usize)>,
}

impl BinaryRelation {
    /// Creates the empty relation over a universe of the given size.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            pairs: BTreeSet::new(),
        }
    }

    /// Creates a relation from explicit pairs, validating their range.
    pub fn from_pairs(
        size: usize,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, UaError> {
        let mut collected = BTreeSet::new();
        for (a, b) in pairs {
            if a >= size || b >= size {
                return Err(UaError::InvalidArgument(
                    ErrorInfo::new("element-range", "relation pair outside the universe")
                        .with_context("pair", format!("({a}, {b})"))
                        .with_context("universe", size),
                ));
            }
            collected.insert((a, b));
        }
        Ok(Self {
            size,
            pairs: collected,
        })
    }

    /// Creates the relation of all ordered distinct related pairs of a partition.
    pub fn from_partition(partition: &Partition) -> Self {
        let size = partition.universe_size();
        let mut pairs = BTreeSet::new();
        for block in partition.blocks() {
            for &a in &block {
                for &b in &block {
                    if a != b {
                        pairs.insert((a, b));
                    }
                }
            }
        }
        Self { size, pairs }
    }

    /// Returns the universe size of the relation.
    pub fn universe_size(&self) -> usize {
        self.size
    }

    /// Returns whether the relation holds for the given pair.
    pub fn contains(&self, pair: (usize, usize)) -> bool {
        self.pairs.contains(&pair)
    }

    /// Returns the number of pairs in the relation.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns whether the relation is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }
}

/// Input data for the centrality test `C(left; right; delta)`.
///
/// Holds two binary relations and a partition over the same universe; the
/// sizes are enforced at construction. A `left`-pair is central when every
/// term-condition matrix built from it and the `right`-pairs has
/// `delta`-agreeing top row exactly when its bottom row `delta`-agrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralityData {
    left: BinaryRelation,
    right: BinaryRelation,
    delta: Partition,
}

impl CentralityData {
    /// Bundles the relations and partition, validating matching sizes.
    pub fn new(
        left: BinaryRelation,
        right: BinaryRelation,
        delta: Partition,
    ) -> Result<Self, UaError> {
        let size = left.universe_size();
        if right.universe_size() != size || delta.universe_size() != size {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("size-mismatch", "centrality inputs live on different universes")
                    .with_context("left", size)
                    .with_context("right", right.universe_size())
                    .with_context("delta", delta.universe_size()),
            ));
        }
        Ok(Self { left, right, delta })
    }

    /// Returns the shared universe size.
    pub fn universe_size(&self) -> usize {
        self.left.universe_size()
    }

    /// Returns the number of blocks of the `delta` partition.
    pub fn delta_blocks(&self) -> usize {
        self.delta.number_of_blocks()
    }

    /// Returns the `left` relation.
    pub fn left(&self) -> &BinaryRelation {
        &self.left
    }

    /// Returns the `right` relation.
    pub fn right(&self) -> &BinaryRelation {
        &self.right
    }

    /// Returns the `delta` partition.
    pub fn delta(&self) -> &Partition {
        &self.delta
    }

    /// Decides whether a `left`-related pair is central, under a budget.
    ///
    /// Matrices are the tuples `(t(a, ū), t(a, v̄), t(b, ū), t(b, v̄))` for
    /// polynomials `t` and `right`-related parameter pairs `(ū, v̄)`,
    /// enumerated as a tuple closure in `A^4` seeded with `(a, a, b, b)`,
    /// `(u, v, u, v)` for every `right`-pair, and the constant diagonals.
    pub fn is_central_within(
        &self,
        alg: &dyn Algebra,
        pair: (usize, usize),
        budget: &mut Budget,
    ) -> Result<bool, UaError> {
        let n = self.universe_size();
        if alg.universe_size() != n {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("size-mismatch", "algebra does not match the centrality universe")
                    .with_context("algebra", alg.universe_size())
                    .with_context("universe", n),
            ));
        }
        if !self.left.contains(pair) {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("pair-not-related", "pair is not related by the left relation")
                    .with_context("pair", format!("({}, {})", pair.0, pair.1)),
            ));
        }
        let (a, b) = pair;
        let mut seeds: Vec<Vec<usize>> = vec![vec![a, a, b, b]];
        for (u, v) in self.right.iter() {
            seeds.push(vec![u, v, u, v]);
        }
        // Constant parameters are the degenerate right-pairs (c, c).
        seeds.extend((0..n).map(|c| vec![c; 4]));
        let matrices = tuple_closure_within(alg, 4, &seeds, budget).map_err(UaError::from)?;
        for matrix in &matrices {
            let top = self.delta.is_related(matrix[0], matrix[1]);
            let bottom = self.delta.is_related(matrix[2], matrix[3]);
            if top != bottom {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Decides whether a `left`-related pair is central.
    pub fn is_central(&self, alg: &dyn Algebra, pair: (usize, usize)) -> Result<bool, UaError> {
        self.is_central_within(alg, pair, &mut Budget::unlimited())
    }
}
