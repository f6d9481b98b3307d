//! The subalgebra lattice of a finite algebra.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use ua_clo::{subuniverse_closure, subuniverse_closure_within, Interrupted};
use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};

use crate::order::OrderRelation;

pub(crate) struct SubLatCore {
    pub(crate) elements: Vec<Vec<usize>>,
    pub(crate) index: BTreeMap<Vec<usize>, usize>,
    pub(crate) order: OrderRelation,
    pub(crate) covers: Vec<(usize, usize)>,
    pub(crate) join_irreducibles: Vec<usize>,
    pub(crate) meet_irreducibles: Vec<usize>,
}

/// The lattice of subuniverses of an algebra, ordered by inclusion.
///
/// Join is generation from the union, meet is plain intersection. The
/// element set is enumerated lazily (the closure of the empty set plus every
/// singleton closure, closed under join) and then frozen; elements are
/// sorted element lists and the lattice stores them in ascending
/// lexicographic order.
pub struct SubalgebraLattice<'a> {
    algebra: &'a dyn Algebra,
    cache: OnceLock<SubLatCore>,
}

impl<'a> SubalgebraLattice<'a> {
    /// Creates a lattice over the given algebra.
    pub fn new(algebra: &'a dyn Algebra) -> Self {
        Self {
            algebra,
            cache: OnceLock::new(),
        }
    }

    /// Returns the algebra the lattice belongs to.
    pub fn algebra(&self) -> &'a dyn Algebra {
        self.algebra
    }

    /// Returns the least subuniverse containing the given subset.
    pub fn generate(&self, subset: &[usize]) -> Result<Vec<usize>, UaError> {
        subuniverse_closure(self.algebra, subset)
    }

    /// Returns the least subuniverse (the closure of the empty set).
    ///
    /// Without nullary operations this is the empty subuniverse.
    pub fn zero(&self) -> Result<Vec<usize>, UaError> {
        self.generate(&[])
    }

    /// Returns the full universe.
    pub fn one(&self) -> Vec<usize> {
        (0..self.algebra.universe_size()).collect()
    }

    /// Returns the join of two subuniverses: the closure of their union.
    pub fn join(&self, x: &[usize], y: &[usize]) -> Result<Vec<usize>, UaError> {
        self.check_member_shape(x)?;
        self.check_member_shape(y)?;
        let mut union = x.to_vec();
        union.extend_from_slice(y);
        self.generate(&union)
    }

    /// Returns the meet of two subuniverses: their intersection.
    pub fn meet(&self, x: &[usize], y: &[usize]) -> Result<Vec<usize>, UaError> {
        self.check_member_shape(x)?;
        self.check_member_shape(y)?;
        Ok(x.iter().copied().filter(|e| y.contains(e)).collect())
    }

    fn check_member_shape(&self, subset: &[usize]) -> Result<(), UaError> {
        let n = self.algebra.universe_size();
        if let Some(&element) = subset.iter().find(|&&element| element >= n) {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("element-range", "subuniverse element outside the universe")
                    .with_context("element", element)
                    .with_context("universe", n),
            ));
        }
        #[cfg(debug_assertions)]
        {
            let closed = subuniverse_closure(self.algebra, subset)?;
            if closed != subset {
                return Err(UaError::InvalidArgument(
                    ErrorInfo::new("not-closed", "argument is not a subuniverse")
                        .with_context("argument_size", subset.len())
                        .with_context("closure_size", closed.len()),
                ));
            }
        }
        Ok(())
    }

    /// Returns whether the lattice has been enumerated and frozen.
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Enumerates the lattice under a budget.
    ///
    /// Only a complete enumeration is cached; on exhaustion the caller
    /// receives every subuniverse discovered so far.
    pub fn build_within(&self, budget: &mut Budget) -> Result<(), Interrupted<Vec<Vec<usize>>>> {
        if self.cache.get().is_some() {
            return Ok(());
        }
        let core = build_core(self.algebra, budget)?;
        let _ = self.cache.set(core);
        Ok(())
    }

    fn core(&self) -> &SubLatCore {
        self.cache.get_or_init(|| {
            match build_core(self.algebra, &mut Budget::unlimited()) {
                Ok(core) => core,
                Err(interrupted) => panic!("unlimited build interrupted: {}", interrupted.error),
            }
        })
    }

    /// Returns every subuniverse, in ascending lexicographic order.
    pub fn subalgebras(&self) -> &[Vec<usize>] {
        &self.core().elements
    }

    /// Returns the subuniverse at the given element index.
    pub fn element(&self, index: usize) -> &[usize] {
        &self.core().elements[index]
    }

    /// Returns the element index of a subuniverse, if it belongs to the lattice.
    pub fn index_of(&self, subset: &[usize]) -> Option<usize> {
        self.core().index.get(subset).copied()
    }

    /// Returns the covering pairs `(lower, upper)` of the inclusion order.
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

fn build_core(
    alg: &dyn Algebra,
    budget: &mut Budget,
) -> Result<SubLatCore, Interrupted<Vec<Vec<usize>>>> {
    let n = alg.universe_size();
    let mut distinct: BTreeMap<Vec<usize>, ()> = BTreeMap::new();

    let mut seeds: Vec<Vec<usize>> = vec![Vec::new()];
    seeds.extend((0..n).map(|x| vec![x]));
    for seed in seeds {
        match subuniverse_closure_within(alg, &seed, budget) {
            Ok(sub) => {
                distinct.insert(sub, ());
            }
            Err(interrupted) => {
                return Err(Interrupted::new(
                    distinct.into_keys().collect(),
                    interrupted.error,
                ));
            }
        }
    }

    // Close under join until nothing new appears.
    let mut frontier: Vec<Vec<usize>> = distinct.keys().cloned().collect();
    while !frontier.is_empty() {
        let mut fresh = Vec::new();
        let existing: Vec<Vec<usize>> = distinct.keys().cloned().collect();
        for left in &existing {
            for right in &frontier {
                if let Err(error) = budget.charge(1) {
                    return Err(Interrupted::new(distinct.into_keys().collect(), error));
                }
                let mut union = left.clone();
                union.extend_from_slice(right);
                let joined = match subuniverse_closure_within(alg, &union, budget) {
                    Ok(joined) => joined,
                    Err(interrupted) => {
                        return Err(Interrupted::new(
                            distinct.into_keys().collect(),
                            interrupted.error,
                        ));
                    }
                };
                if !distinct.contains_key(&joined) {
                    distinct.insert(joined.clone(), ());
                    fresh.push(joined);
                }
            }
        }
        frontier = fresh;
    }

    let elements: Vec<Vec<usize>> = distinct.keys().cloned().collect();
    let index: BTreeMap<Vec<usize>, usize> = elements
        .iter()
        .enumerate()
        .map(|(idx, key)| (key.clone(), idx))
        .collect();

    let count = elements.len();
    let mut matrix = Vec::with_capacity(count * count);
    for x in &elements {
        for y in &elements {
            matrix.push(x.iter().all(|e| y.contains(e)));
        }
    }
    let order = OrderRelation::from_matrix(count, matrix);
    let covers = order.covering_pairs();
    let join_irreducibles = order.join_irreducibles(&covers);
    let meet_irreducibles = order.meet_irreducibles(&covers);
    Ok(SubLatCore {
        elements,
        index,
        order,
        covers,
        join_irreducibles,
        meet_irreducibles,
    })
}
