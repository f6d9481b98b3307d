//! Subuniverse generation by repeated operation application.

use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget};

use crate::{advance, Interrupted};

/// Computes the least subuniverse containing the seed elements, under a budget.
///
/// Each pass applies every operation to every tuple drawn from the current
/// set and records new results; the closure is reached once a pass adds
/// nothing. Nullary operations contribute their constants even to the empty
/// seed. The returned elements are sorted and deduplicated; the partial set
/// carried by an interruption is sorted the same way.
pub fn subuniverse_closure_within(
    alg: &dyn Algebra,
    seed: &[usize],
    budget: &mut Budget,
) -> Result<Vec<usize>, Interrupted<Vec<usize>>> {
    let n = alg.universe_size();
    for &element in seed {
        if element >= n {
            return Err(Interrupted::new(
                Vec::new(),
                UaError::InvalidArgument(
                    ErrorInfo::new("element-range", "seed element outside the universe")
                        .with_context("element", element)
                        .with_context("universe", n),
                ),
            ));
        }
    }

    let mut member = vec![false; n];
    let mut elements: Vec<usize> = Vec::new();
    let mut sorted_seed = seed.to_vec();
    sorted_seed.sort_unstable();
    for element in sorted_seed {
        if !member[element] {
            member[element] = true;
            elements.push(element);
        }
    }

    loop {
        let mut changed = false;
        let snapshot = elements.clone();
        for op in alg.operations() {
            let arity = op.arity();
            if arity > 0 && snapshot.is_empty() {
                continue;
            }
            let mut digits = vec![0usize; arity];
            let mut args = vec![0usize; arity];
            loop {
                if let Err(error) = budget.charge(1) {
                    elements.sort_unstable();
                    return Err(Interrupted::new(elements, error));
                }
                for (slot, &digit) in digits.iter().enumerate() {
                    args[slot] = snapshot[digit];
                }
                let result = op.value_at(&args);
                if !member[result] {
                    member[result] = true;
                    elements.push(result);
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

    elements.sort_unstable();
    Ok(elements)
}

/// Computes the least subuniverse containing the seed elements.
pub fn subuniverse_closure(alg: &dyn Algebra, seed: &[usize]) -> Result<Vec<usize>, UaError> {
    subuniverse_closure_within(alg, seed, &mut Budget::unlimited()).map_err(UaError::from)
}
