//! Subuniverse generation inside finite powers of an algebra.

use std::collections::BTreeSet;

use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};

use crate::{advance, Interrupted};

/// Computes the closure of seed tuples under componentwise operations, under
/// a budget.
///
/// This is subuniverse generation inside `A^width`: an operation of arity
/// `k` combines `k` known tuples into the tuple of componentwise values.
/// Unary polynomial enumeration, pair closures, and centrality matrices are
/// all instances with different seed sets. Nullary operations contribute
/// constant tuples.
pub fn tuple_closure_within(
    alg: &dyn Algebra,
    width: usize,
    seeds: &[Vec<usize>],
    budget: &mut Budget,
) -> Result<BTreeSet<Vec<usize>>, Interrupted<BTreeSet<Vec<usize>>>> {
    let n = alg.universe_size();
    if width == 0 {
        return Err(Interrupted::new(
            BTreeSet::new(),
            UaError::invalid_argument("empty-width", "tuple closure requires a positive width"),
        ));
    }
    for (idx, tuple) in seeds.iter().enumerate() {
        if tuple.len() != width {
            return Err(Interrupted::new(
                BTreeSet::new(),
                UaError::InvalidArgument(
                    ErrorInfo::new("width-mismatch", "seed tuple has the wrong width")
                        .with_context("seed", idx)
                        .with_context("expected", width)
                        .with_context("actual", tuple.len()),
                ),
            ));
        }
        if let Some(&element) = tuple.iter().find(|&&element| element >= n) {
            return Err(Interrupted::new(
                BTreeSet::new(),
                UaError::InvalidArgument(
                    ErrorInfo::new("element-range", "seed tuple entry outside the universe")
                        .with_context("seed", idx)
                        .with_context("element", element)
                        .with_context("universe", n),
                ),
            ));
        }
    }

    let mut members: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut order: Vec<Vec<usize>> = Vec::new();
    for tuple in seeds {
        if members.insert(tuple.clone()) {
            order.push(tuple.clone());
        }
    }

    loop {
        let mut changed = false;
        let snapshot = order.clone();
        for op in alg.operations() {
            let arity = op.arity();
            if arity > 0 && snapshot.is_empty() {
                continue;
            }
            let mut digits = vec![0usize; arity];
            let mut args = vec![0usize; arity];
            loop {
                if let Err(error) = budget.charge(1) {
                    return Err(Interrupted::new(members, error));
                }
                let result: Vec<usize> = (0..width)
                    .map(|component| {
                        for (slot, &digit) in digits.iter().enumerate() {
                            args[slot] = snapshot[digit][component];
                        }
                        op.value_at(&args)
                    })
                    .collect();
                if members.insert(result.clone()) {
                    order.push(result);
                    changed = true;
                }
                if !advance(&mut digits, snapshot.len()) {
                    break;
                }
            }
        }
        if !changed {
            break;
        }
    }
    Ok(members)
}

/// Computes the closure of seed tuples under componentwise operations.
pub fn tuple_closure(
    alg: &dyn Algebra,
    width: usize,
    seeds: &[Vec<usize>],
) -> Result<BTreeSet<Vec<usize>>, UaError> {
    tuple_closure_within(alg, width, seeds, &mut Budget::unlimited()).map_err(UaError::from)
}
