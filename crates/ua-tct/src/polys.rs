//! Unary polynomial maps of a finite algebra.

use std::collections::BTreeSet;

use ua_clo::tuple_closure_within;
use ua_core::{Algebra, Budget, UaError};

/// Enumerates the unary polynomial maps of the algebra, under a budget.
///
/// A map is represented by its value tuple `(p(0), …, p(n-1))`; the set is
/// the closure of the identity tuple and every constant tuple under
/// componentwise operations, i.e. subuniverse generation inside `A^n`.
pub fn unary_polynomials(
    alg: &dyn Algebra,
    budget: &mut Budget,
) -> Result<BTreeSet<Vec<usize>>, UaError> {
    let n = alg.universe_size();
    let mut seeds: Vec<Vec<usize>> = Vec::with_capacity(n + 1);
    seeds.push((0..n).collect());
    seeds.extend((0..n).map(|c| vec![c; n]));
    tuple_closure_within(alg, n, &seeds, budget).map_err(UaError::from)
}

/// Returns the sorted, deduplicated range of a map.
pub fn range_of(map: &[usize]) -> Vec<usize> {
    let set: BTreeSet<usize> = map.iter().copied().collect();
    set.into_iter().collect()
}

/// Composes two maps: `(outer ∘ inner)(x) = outer[inner[x]]`.
pub fn compose(outer: &[usize], inner: &[usize]) -> Vec<usize> {
    inner.iter().map(|&x| outer[x]).collect()
}

/// Returns whether a map is idempotent under composition.
pub fn is_idempotent(map: &[usize]) -> bool {
    map.iter().all(|&image| map[image] == image)
}
