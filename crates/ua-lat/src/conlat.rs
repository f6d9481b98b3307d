//! The congruence lattice of a finite algebra.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use ua_clo::{congruence_closure, congruence_closure_within, Interrupted};
use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};
use ua_part::Partition;

use crate::order::OrderRelation;
use crate::sweep::principal_sweep;

pub(crate) struct ConLatCore {
    pub(crate) elements: Vec<Partition>,
    pub(crate) index: BTreeMap<Vec<i64>, usize>,
    pub(crate) order: OrderRelation,
    pub(crate) covers: Vec<(usize, usize)>,
    pub(crate) join_irreducibles: Vec<usize>,
    pub(crate) meet_irreducibles: Vec<usize>,
}

/// The lattice of congruences of an algebra.
///
/// The element set is enumerated lazily on first request and frozen for the
/// lifetime of the lattice: principal congruences are closed for every pair,
/// the distinct results are closed under join, and the covering relation and
/// irreducible sets are derived once. Concurrent readers only ever observe
/// the frozen state. Elements are stored sorted by canonical array; every
/// index-based accessor refers to that order.
pub struct CongruenceLattice<'a> {
    algebra: &'a dyn Algebra,
    workers: usize,
    cache: OnceLock<ConLatCore>,
}

impl<'a> CongruenceLattice<'a> {
    /// Creates a lattice over the given algebra with a serial build.
    pub fn new(algebra: &'a dyn Algebra) -> Self {
        Self::with_workers(algebra, 1)
    }

    /// Creates a lattice whose unbudgeted build fans the principal sweep
    /// across the given number of worker threads.
    ///
    /// Independent principal closures share no mutable state, so the sweep
    /// parallelizes without locking; results are merged in pair order and the
    /// outcome is identical to the serial build.
    pub fn with_workers(algebra: &'a dyn Algebra, workers: usize) -> Self {
        Self {
            algebra,
            workers: workers.max(1),
            cache: OnceLock::new(),
        }
    }

    /// Returns the algebra the lattice belongs to.
    pub fn algebra(&self) -> &'a dyn Algebra {
        self.algebra
    }

    /// Returns the bottom congruence (all singleton blocks).
    pub fn zero(&self) -> Partition {
        Partition::zero(self.algebra.universe_size())
    }

    /// Returns the top congruence (a single block).
    pub fn one(&self) -> Partition {
        Partition::one(self.algebra.universe_size())
    }

    /// Returns the least congruence relating `a` and `b`.
    pub fn principal_congruence(&self, a: usize, b: usize) -> Result<Partition, UaError> {
        let n = self.algebra.universe_size();
        if a >= n || b >= n {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("element-range", "principal congruence pair outside the universe")
                    .with_context("pair", format!("({a}, {b})"))
                    .with_context("universe", n),
            ));
        }
        congruence_closure(self.algebra, &[(a, b)])
    }

    /// Returns the join of two congruences.
    ///
    /// The join of two congruences coincides with the partition join, so no
    /// re-closing is needed; compatibility of the inputs is an invariant of
    /// how congruences are produced and is re-checked only in debug builds.
    pub fn join(&self, x: &Partition, y: &Partition) -> Result<Partition, UaError> {
        self.check_member_shape(x)?;
        self.check_member_shape(y)?;
        x.join(y)
    }

    /// Returns the meet of two congruences (the blockwise intersection).
    pub fn meet(&self, x: &Partition, y: &Partition) -> Result<Partition, UaError> {
        self.check_member_shape(x)?;
        self.check_member_shape(y)?;
        x.meet(y)
    }

    fn check_member_shape(&self, theta: &Partition) -> Result<(), UaError> {
        let n = self.algebra.universe_size();
        if theta.universe_size() != n {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("size-mismatch", "congruence does not match the algebra's universe")
                    .with_context("partition", theta.universe_size())
                    .with_context("universe", n),
            ));
        }
        #[cfg(debug_assertions)]
        ua_part::verify_congruence(self.algebra, theta)?;
        Ok(())
    }

    /// Returns whether the lattice has been enumerated and frozen.
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Enumerates the lattice under a budget.
    ///
    /// Only a complete enumeration is cached; on exhaustion the caller
    /// receives every congruence discovered so far and the lattice stays
    /// unbuilt. The budgeted build is always serial so the charge sequence
    /// is reproducible.
    pub fn build_within(&self, budget: &mut Budget) -> Result<(), Interrupted<Vec<Partition>>> {
        if self.cache.get().is_some() {
            return Ok(());
        }
        let core = build_core(self.algebra, budget)?;
        let _ = self.cache.set(core);
        Ok(())
    }

    fn core(&self) -> &ConLatCore {
        self.cache
            .get_or_init(|| build_core_parallel(self.algebra, self.workers))
    }

    /// Returns every congruence, sorted by canonical array.
    pub fn congruences(&self) -> &[Partition] {
        &self.core().elements
    }

    /// Returns the congruence at the given element index.
    pub fn element(&self, index: usize) -> &Partition {
        &self.core().elements[index]
    }

    /// Returns the element index of a congruence, if it belongs to the lattice.
    pub fn index_of(&self, theta: &Partition) -> Option<usize> {
        self.core().index.get(&theta.to_array()).copied()
    }

    /// Returns the covering pairs `(lower, upper)` of the lattice order.
    pub fn covers(&self) -> &[(usize, usize)] {
        &self.core().covers
    }

    /// Returns the element indices with exactly one lower cover.
    pub fn join_irreducibles(&self) -> &[usize] {
        &self.core().join_irreducibles
    }

    /// Returns the element indices with exactly one upper cover.
    pub fn meet_irreducibles(&self) -> &[usize] {
        &self.core().meet_irreducibles
    }

    /// Returns the indices covered by the given element.
    pub fn lower_covers(&self, index: usize) -> Vec<usize> {
        let core = self.core();
        core.order.lower_covers(index, &core.covers)
    }

    /// Returns the indices covering the given element.
    pub fn upper_covers(&self, index: usize) -> Vec<usize> {
        let core = self.core();
        core.order.upper_covers(index, &core.covers)
    }
}

fn build_core_parallel(alg: &dyn Algebra, workers: usize) -> ConLatCore {
    let principals =
        principal_sweep(alg, workers).expect("principal pairs are generated in range");
    match assemble(alg.universe_size(), principals, &mut Budget::unlimited()) {
        Ok(core) => core,
        Err(interrupted) => panic!("unlimited build interrupted: {}", interrupted.error),
    }
}

fn build_core(
    alg: &dyn Algebra,
    budget: &mut Budget,
) -> Result<ConLatCore, Interrupted<Vec<Partition>>> {
    let n = alg.universe_size();
    let mut principals = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            match congruence_closure_within(alg, &[(a, b)], budget) {
                Ok(theta) => principals.push(theta),
                Err(interrupted) => {
                    principals.push(interrupted.partial);
                    return Err(Interrupted::new(dedupe(n, principals), interrupted.error));
                }
            }
        }
    }
    assemble(n, principals, budget)
}

fn dedupe(n: usize, discovered: Vec<Partition>) -> Vec<Partition> {
    let mut distinct: BTreeMap<Vec<i64>, Partition> = BTreeMap::new();
    distinct.insert(Partition::zero(n).to_array(), Partition::zero(n));
    for theta in discovered {
        distinct.entry(theta.to_array()).or_insert(theta);
    }
    distinct.into_values().collect()
}

fn assemble(
    n: usize,
    principals: Vec<Partition>,
    budget: &mut Budget,
) -> Result<ConLatCore, Interrupted<Vec<Partition>>> {
    let mut distinct: BTreeMap<Vec<i64>, Partition> = BTreeMap::new();
    distinct.insert(Partition::zero(n).to_array(), Partition::zero(n));
    for theta in principals {
        distinct.entry(theta.to_array()).or_insert(theta);
    }

    // Close the discovered congruences under join until nothing new appears.
    let mut frontier: Vec<Partition> = distinct.values().cloned().collect();
    while !frontier.is_empty() {
        let mut fresh = Vec::new();
        let existing: Vec<Partition> = distinct.values().cloned().collect();
        for left in &existing {
            for right in &frontier {
                if let Err(error) = budget.charge(1) {
                    return Err(Interrupted::new(
                        distinct.into_values().collect(),
                        error,
                    ));
                }
                let joined = match left.join(right) {
                    Ok(joined) => joined,
                    Err(error) => {
                        return Err(Interrupted::new(distinct.into_values().collect(), error))
                    }
                };
                let key = joined.to_array();
                if !distinct.contains_key(&key) {
                    distinct.insert(key, joined.clone());
                    fresh.push(joined);
                }
            }
        }
        frontier = fresh;
    }

    let elements: Vec<Partition> = distinct.values().cloned().collect();
    let index: BTreeMap<Vec<i64>, usize> = distinct
        .keys()
        .enumerate()
        .map(|(idx, key)| (key.clone(), idx))
        .collect();

    let count = elements.len();
    let mut matrix = Vec::with_capacity(count * count);
    for x in 0..count {
        for y in 0..count {
            match elements[x].leq(&elements[y]) {
                Ok(below) => matrix.push(below),
                Err(error) => {
                    return Err(Interrupted::new(elements.clone(), error));
                }
            }
        }
    }
    let order = OrderRelation::from_matrix(count, matrix);
    let covers = order.covering_pairs();
    let join_irreducibles = order.join_irreducibles(&covers);
    let meet_irreducibles = order.meet_irreducibles(&covers);
    Ok(ConLatCore {
        elements,
        index,
        order,
        covers,
        join_irreducibles,
        meet_irreducibles,
    })
}
