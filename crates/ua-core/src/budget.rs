//! Step budgets threaded through closure and enumeration loops.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, UaError};

/// Explicit step budget passed by the caller into budgeted entry points.
///
/// Closures terminate by construction, but full lattice enumeration and
/// exhaustive minimal-set search are worst-case exponential in the universe
/// size. Callers bound them by handing a budget down the call chain; every
/// evaluated tuple, join, or map composition charges one step. The budget is
/// plain data owned by the caller, so independent tasks never contend on
/// shared counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    limit: Option<u64>,
    spent: u64,
}

impl Budget {
    /// Creates a budget that never runs out.
    pub fn unlimited() -> Self {
        Self {
            limit: None,
            spent: 0,
        }
    }

    /// Creates a budget allowing at most `steps` charged steps.
    pub fn with_limit(steps: u64) -> Self {
        Self {
            limit: Some(steps),
            spent: 0,
        }
    }

    /// Returns the configured limit, if any.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the number of steps charged so far.
    pub fn spent(&self) -> u64 {
        self.spent
    }

    /// Charges `steps` against the budget.
    ///
    /// Fails with [`UaError::ResourceExceeded`] once the total charged amount
    /// crosses the limit; the error names both the limit and the running
    /// total so callers can report how far the computation got.
    pub fn charge(&mut self, steps: u64) -> Result<(), UaError> {
        self.spent = self.spent.saturating_add(steps);
        match self.limit {
            Some(limit) if self.spent > limit => Err(UaError::ResourceExceeded(
                ErrorInfo::new("budget-exhausted", "enumeration budget exhausted")
                    .with_context("limit", limit)
                    .with_context("spent", self.spent),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}
