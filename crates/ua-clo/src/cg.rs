//! Congruence generation by worklist closure.

use std::collections::VecDeque;

use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};
use ua_part::Partition;

use crate::{advance, Interrupted};

/// Computes the least congruence relating every seed pair, under a budget.
///
/// Seed pairs are unioned and enqueued; each dequeued pair is substituted
/// into every operation at every argument position against every
/// lexicographic tuple of the remaining coordinates, and newly related
/// result pairs are enqueued in turn. Every merge lowers the block count, so
/// the loop terminates after at most `n - 1` merges; the budget bounds
/// enumeration cost, not termination. One step is charged per evaluated
/// tuple pair.
pub fn congruence_closure_within(
    alg: &dyn Algebra,
    pairs: &[(usize, usize)],
    budget: &mut Budget,
) -> Result<Partition, Interrupted<Partition>> {
    let n = alg.universe_size();
    for &(a, b) in pairs {
        if a >= n || b >= n {
            return Err(Interrupted::new(
                Partition::zero(n),
                UaError::InvalidArgument(
                    ErrorInfo::new("element-range", "seed pair outside the universe")
                        .with_context("pair", format!("({a}, {b})"))
                        .with_context("universe", n),
                ),
            ));
        }
    }

    let mut part = Partition::zero(n);
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    for &(a, b) in pairs {
        if part.union(a, b) {
            queue.push_back((a, b));
        }
    }

    while let Some((a, b)) = queue.pop_front() {
        for op in alg.operations() {
            let arity = op.arity();
            if arity == 0 {
                continue;
            }
            for position in 0..arity {
                let mut rest = vec![0usize; arity - 1];
                loop {
                    if let Err(error) = budget.charge(1) {
                        return Err(Interrupted::new(part, error));
                    }
                    let mut args_a = rest[..position].to_vec();
                    args_a.push(a);
                    args_a.extend_from_slice(&rest[position..]);
                    let mut args_b = rest[..position].to_vec();
                    args_b.push(b);
                    args_b.extend_from_slice(&rest[position..]);
                    let left = op.value_at(&args_a);
                    let right = op.value_at(&args_b);
                    if part.union(left, right) {
                        queue.push_back((left, right));
                    }
                    if !advance(&mut rest, n) {
                        break;
                    }
                }
            }
        }
    }
    Ok(part)
}

/// Computes the least congruence relating every seed pair.
pub fn congruence_closure(alg: &dyn Algebra, pairs: &[(usize, usize)]) -> Result<Partition, UaError> {
    congruence_closure_within(alg, pairs, &mut Budget::unlimited()).map_err(UaError::from)
}
