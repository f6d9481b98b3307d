#![deny(missing_docs)]
#![doc = "Fixed-point closure engine: congruence generation, subuniverse \
generation, and tuple closure inside finite powers."]

pub mod cg;
pub mod power;
pub mod sg;

pub use cg::{congruence_closure, congruence_closure_within};
pub use power::{tuple_closure, tuple_closure_within};
pub use sg::{subuniverse_closure, subuniverse_closure_within};

use ua_core::UaError;

/// A budgeted closure that stopped early, carrying the state discovered so far.
///
/// Budgeted entry points never truncate silently: when the budget runs out
/// mid-closure the caller receives both the error and the partial structure,
/// which is a sound under-approximation of the fixed point (everything in it
/// belongs to the closure; the closure may hold more).
#[derive(Debug, Clone)]
pub struct Interrupted<T> {
    /// The structure discovered before the computation stopped.
    pub partial: T,
    /// The error that stopped the computation.
    pub error: UaError,
}

impl<T> Interrupted<T> {
    /// Bundles a partial structure with the error that interrupted it.
    pub fn new(partial: T, error: UaError) -> Self {
        Self { partial, error }
    }
}

impl<T> From<Interrupted<T>> for UaError {
    fn from(interrupted: Interrupted<T>) -> Self {
        interrupted.error
    }
}

/// Advances a mixed-radix odometer; returns false once it wraps to zero.
pub(crate) fn advance(digits: &mut [usize], radix: usize) -> bool {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit < radix {
            return true;
        }
        *digit = 0;
    }
    false
}
