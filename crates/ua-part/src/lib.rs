#![deny(missing_docs)]
#![doc = "Union-find partitions of the universe `[0, n)` and quotient \
construction over them."]

pub mod quotient;

pub use quotient::{project_partition, quotient_algebra, verify_congruence};

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use ua_core::errors::{ErrorInfo, UaError};

/// An equivalence relation on `[0, n)` in union-find representation.
///
/// Each index holds either a negative value `-b` at a block root (the root of
/// a block of size `b`) or a non-negative value naming an ancestor toward the
/// root. [`Partition::union`] is the only mutator; every combinator returns a
/// new value. Equality, hashing, and the canonical array export all go
/// through the canonical form, in which every block is rooted at its least
/// element and non-roots point directly at the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Partition {
    entries: Vec<i64>,
}

impl Partition {
    /// Returns the partition of `n` singleton blocks.
    pub fn zero(n: usize) -> Self {
        Self {
            entries: vec![-1; n],
        }
    }

    /// Returns the partition with a single block of size `n`.
    pub fn one(n: usize) -> Self {
        if n == 0 {
            return Self {
                entries: Vec::new(),
            };
        }
        let mut entries = vec![0i64; n];
        entries[0] = -(n as i64);
        Self { entries }
    }

    /// Reconstructs a partition from its array encoding.
    ///
    /// Rejects malformed root/pointer structure: out-of-range parents,
    /// pointer cycles, self-pointing non-roots, and roots whose recorded
    /// block size disagrees with the actual block population.
    pub fn from_array(ints: Vec<i64>) -> Result<Self, UaError> {
        let n = ints.len();
        for (idx, &entry) in ints.iter().enumerate() {
            if entry >= 0 {
                let parent = entry as usize;
                if parent >= n {
                    return Err(UaError::InvalidArgument(
                        ErrorInfo::new("parent-range", "parent pointer outside the universe")
                            .with_context("index", idx)
                            .with_context("parent", parent)
                            .with_context("universe", n),
                    ));
                }
                if parent == idx {
                    return Err(UaError::InvalidArgument(
                        ErrorInfo::new("self-pointer", "non-root entry points at itself")
                            .with_context("index", idx),
                    ));
                }
            } else {
                let size = entry.unsigned_abs() as usize;
                if size > n {
                    return Err(UaError::InvalidArgument(
                        ErrorInfo::new("block-size-range", "root records an impossible block size")
                            .with_context("index", idx)
                            .with_context("size", size)
                            .with_context("universe", n),
                    ));
                }
            }
        }
        let candidate = Self { entries: ints };
        let mut population = vec![0usize; n];
        for idx in 0..n {
            let root = candidate.checked_find(idx)?;
            population[root] += 1;
        }
        for idx in 0..n {
            let entry = candidate.entries[idx];
            if entry < 0 {
                let size = entry.unsigned_abs() as usize;
                if population[idx] != size {
                    return Err(UaError::InvalidArgument(
                        ErrorInfo::new("block-size", "recorded block size disagrees with members")
                            .with_context("root", idx)
                            .with_context("recorded", size)
                            .with_context("actual", population[idx]),
                    ));
                }
            }
        }
        Ok(candidate)
    }

    /// Returns the size of the universe the partition lives on.
    pub fn universe_size(&self) -> usize {
        self.entries.len()
    }

    /// Returns the root of the block containing `x`.
    pub fn find(&self, x: usize) -> usize {
        let mut current = x;
        while self.entries[current] >= 0 {
            current = self.entries[current] as usize;
        }
        current
    }

    fn checked_find(&self, x: usize) -> Result<usize, UaError> {
        let mut current = x;
        let mut steps = 0usize;
        while self.entries[current] >= 0 {
            current = self.entries[current] as usize;
            steps += 1;
            if steps > self.entries.len() {
                return Err(UaError::InvalidArgument(
                    ErrorInfo::new("pointer-cycle", "parent pointers form a cycle")
                        .with_context("index", x),
                ));
            }
        }
        Ok(current)
    }

    /// Merges the blocks containing `x` and `y`; returns whether a merge occurred.
    ///
    /// The smaller block's root is attached under the larger; equal sizes
    /// attach the larger-index root under the smaller so the outcome is
    /// deterministic.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        let sx = -self.entries[rx];
        let sy = -self.entries[ry];
        let (keep, absorb) = if sx > sy || (sx == sy && rx < ry) {
            (rx, ry)
        } else {
            (ry, rx)
        };
        self.entries[keep] = -(sx + sy);
        self.entries[absorb] = keep as i64;
        true
    }

    /// Returns whether `a` and `b` lie in the same block.
    pub fn is_related(&self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns the number of blocks.
    pub fn number_of_blocks(&self) -> usize {
        self.entries.iter().filter(|entry| **entry < 0).count()
    }

    /// Returns, for every element, the least element of its block.
    pub fn min_representatives(&self) -> Vec<usize> {
        let n = self.entries.len();
        let mut rep_of_root: BTreeMap<usize, usize> = BTreeMap::new();
        let mut reps = vec![0usize; n];
        for x in 0..n {
            let root = self.find(x);
            let rep = *rep_of_root.entry(root).or_insert(x);
            reps[x] = rep;
        }
        reps
    }

    /// Returns, for every element, the index of its block.
    ///
    /// Blocks are numbered `0, 1, …` in ascending order of their least
    /// element, the numbering used by quotient universes.
    pub fn block_indices(&self) -> Vec<usize> {
        let reps = self.min_representatives();
        let mut index_of_rep: BTreeMap<usize, usize> = BTreeMap::new();
        for &rep in &reps {
            let next = index_of_rep.len();
            index_of_rep.entry(rep).or_insert(next);
        }
        reps.iter().map(|rep| index_of_rep[rep]).collect()
    }

    /// Returns the blocks as sorted element lists, ordered by least element.
    pub fn blocks(&self) -> Vec<Vec<usize>> {
        let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for x in 0..self.entries.len() {
            by_root.entry(self.find(x)).or_default().push(x);
        }
        let mut blocks: Vec<Vec<usize>> = by_root.into_values().collect();
        blocks.sort_by_key(|block| block[0]);
        blocks
    }

    /// Returns a spanning set of related pairs, one chain per block.
    ///
    /// Closing these pairs under transitivity recovers the partition, so
    /// they serve as generators when re-closing congruences.
    pub fn generating_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for block in self.blocks() {
            for window in block.windows(2) {
                pairs.push((window[0], window[1]));
            }
        }
        pairs
    }

    /// Returns whether every block of `self` is contained in a block of `other`.
    pub fn leq(&self, other: &Partition) -> Result<bool, UaError> {
        self.check_same_universe(other)?;
        let reps = self.min_representatives();
        Ok((0..self.entries.len()).all(|x| other.is_related(x, reps[x])))
    }

    /// Returns the least partition above both `self` and `other`.
    pub fn join(&self, other: &Partition) -> Result<Partition, UaError> {
        self.check_same_universe(other)?;
        let mut result = self.clone();
        for (a, b) in other.generating_pairs() {
            result.union(a, b);
        }
        Ok(result)
    }

    /// Returns the greatest partition below both `self` and `other`.
    ///
    /// Elements are related in the meet exactly when they are related in
    /// both operands.
    pub fn meet(&self, other: &Partition) -> Result<Partition, UaError> {
        self.check_same_universe(other)?;
        let n = self.entries.len();
        let mut result = Partition::zero(n);
        let mut first_seen: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for x in 0..n {
            let key = (self.find(x), other.find(x));
            match first_seen.get(&key) {
                Some(&rep) => {
                    result.union(rep, x);
                }
                None => {
                    first_seen.insert(key, x);
                }
            }
        }
        Ok(result)
    }

    /// Exports the canonical array encoding.
    ///
    /// In the canonical form every block is rooted at its least element and
    /// every other member points directly at that root, so the export
    /// round-trips through [`Partition::from_array`].
    pub fn to_array(&self) -> Vec<i64> {
        let n = self.entries.len();
        let reps = self.min_representatives();
        let mut sizes: BTreeMap<usize, i64> = BTreeMap::new();
        for &rep in &reps {
            *sizes.entry(rep).or_insert(0) += 1;
        }
        let mut canonical = vec![0i64; n];
        for x in 0..n {
            if reps[x] == x {
                canonical[x] = -sizes[&x];
            } else {
                canonical[x] = reps[x] as i64;
            }
        }
        canonical
    }

    fn check_same_universe(&self, other: &Partition) -> Result<(), UaError> {
        if self.entries.len() != other.entries.len() {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("size-mismatch", "partitions live on different universes")
                    .with_context("left", self.entries.len())
                    .with_context("right", other.entries.len()),
            ));
        }
        Ok(())
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.min_representatives() == other.min_representatives()
    }
}

impl Eq for Partition {}

impl Hash for Partition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min_representatives().hash(state);
    }
}

impl TryFrom<Vec<i64>> for Partition {
    type Error = UaError;

    fn try_from(ints: Vec<i64>) -> Result<Self, Self::Error> {
        Partition::from_array(ints)
    }
}

impl From<Partition> for Vec<i64> {
    fn from(partition: Partition) -> Self {
        partition.to_array()
    }
}
