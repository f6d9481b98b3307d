//! Subtrace search: pair closures and the minimality predicate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ua_clo::tuple_closure_within;
use ua_core::{Algebra, Budget, UaError};
use ua_part::Partition;

use crate::TctType;

/// The two-element witness of a join-irreducible congruence's local type.
///
/// `first` and `second` are elements of the original universe; the type is
/// populated by the type finder once classification has run, and
/// `has_involution` records whether some unary polynomial swaps the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtrace {
    /// First element of the witness pair.
    pub first: usize,
    /// Second element of the witness pair.
    pub second: usize,
    /// The local type, when classification has run.
    pub tct_type: Option<TctType>,
    /// Whether a unary polynomial exchanges the two elements.
    pub has_involution: bool,
}

/// Computes the unary-polynomial images `(p(a), p(b))` of a pair.
///
/// This is the pair closure in `A^2`: the seed pair plus every constant
/// diagonal, closed under componentwise operations. With `symmetrized` set,
/// the swapped pair is seeded as well, which is the closure used by the
/// minimality predicate; the plain closure detects involutions.
pub fn pair_closure(
    alg: &dyn Algebra,
    pair: (usize, usize),
    symmetrized: bool,
    budget: &mut Budget,
) -> Result<BTreeSet<Vec<usize>>, UaError> {
    let n = alg.universe_size();
    let mut seeds: Vec<Vec<usize>> = vec![vec![pair.0, pair.1]];
    if symmetrized {
        seeds.push(vec![pair.1, pair.0]);
    }
    seeds.extend((0..n).map(|c| vec![c; 2]));
    tuple_closure_within(alg, 2, &seeds, budget).map_err(UaError::from)
}

/// Returns whether a unary polynomial exchanges the two elements of the pair.
pub fn has_involution(
    alg: &dyn Algebra,
    pair: (usize, usize),
    budget: &mut Budget,
) -> Result<bool, UaError> {
    let closure = pair_closure(alg, pair, false, budget)?;
    Ok(closure.contains(&vec![pair.1, pair.0]))
}

/// The subtrace predicate for a pair, in the quotient by the lower cover.
///
/// The pair must be distinct and `beta`-related. It is a subtrace when its
/// polynomial closure collapses back onto it: every distinct `beta`-related
/// image pair reaches the original pair again, so the pair generates a
/// two-element structure under the polynomials that keep it apart.
pub fn is_minimal_pair(
    alg: &dyn Algebra,
    beta: &Partition,
    pair: (usize, usize),
    budget: &mut Budget,
) -> Result<bool, UaError> {
    let up = pair_closure(alg, pair, true, budget)?;
    for image in &up {
        let (u, v) = (image[0], image[1]);
        if u == v || !beta.is_related(u, v) {
            continue;
        }
        if (u, v) == pair {
            continue;
        }
        let down = pair_closure(alg, (u, v), true, budget)?;
        if !down.contains(&vec![pair.0, pair.1]) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Walks downward from a pair until a minimal pair is reached.
///
/// Each step moves to a `beta`-related image pair that cannot reach the
/// current pair back; every step strictly descends the reachability
/// preorder, so the walk terminates at a subtrace pair.
pub fn minimize_pair(
    alg: &dyn Algebra,
    beta: &Partition,
    start: (usize, usize),
    budget: &mut Budget,
) -> Result<(usize, usize), UaError> {
    let mut current = start;
    loop {
        let up = pair_closure(alg, current, true, budget)?;
        let mut descended = false;
        for image in &up {
            let (u, v) = (image[0], image[1]);
            if u == v || !beta.is_related(u, v) || (u, v) == current {
                continue;
            }
            let down = pair_closure(alg, (u, v), true, budget)?;
            if !down.contains(&vec![current.0, current.1]) {
                current = (u, v);
                descended = true;
                break;
            }
        }
        if !descended {
            return Ok(current);
        }
    }
}
