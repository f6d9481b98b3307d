//! Table-backed algebra carrier.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, UaError};
use crate::{Algebra, Operation};

/// A finitary operation stored as a flat mixed-radix value table.
///
/// The table holds `n^arity` entries; the value for the argument tuple
/// `(a_0, …, a_{k-1})` lives at index `((a_0 · n + a_1) · n + …) + a_{k-1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableOpRepr", into = "TableOpRepr")]
pub struct TableOp {
    universe: usize,
    arity: usize,
    table: Vec<usize>,
}

#[derive(Serialize, Deserialize)]
struct TableOpRepr {
    universe: usize,
    arity: usize,
    table: Vec<usize>,
}

impl TryFrom<TableOpRepr> for TableOp {
    type Error = UaError;

    fn try_from(repr: TableOpRepr) -> Result<Self, Self::Error> {
        TableOp::new(repr.universe, repr.arity, repr.table)
    }
}

impl From<TableOp> for TableOpRepr {
    fn from(op: TableOp) -> Self {
        Self {
            universe: op.universe,
            arity: op.arity,
            table: op.table,
        }
    }
}

impl TableOp {
    /// Creates an operation from a flat value table.
    ///
    /// Validates that the table holds exactly `universe^arity` entries and
    /// that every entry is inside the universe.
    pub fn new(universe: usize, arity: usize, table: Vec<usize>) -> Result<Self, UaError> {
        if universe == 0 {
            return Err(UaError::invalid_argument(
                "empty-universe",
                "operations require a non-empty universe",
            ));
        }
        let expected = universe.pow(arity as u32);
        if table.len() != expected {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("table-size", "operation table has the wrong length")
                    .with_context("expected", expected)
                    .with_context("actual", table.len())
                    .with_context("arity", arity),
            ));
        }
        if let Some((idx, value)) = table
            .iter()
            .enumerate()
            .find(|(_, value)| **value >= universe)
        {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("value-range", "operation table entry out of range")
                    .with_context("index", idx)
                    .with_context("value", *value)
                    .with_context("universe", universe),
            ));
        }
        Ok(Self {
            universe,
            arity,
            table,
        })
    }

    /// Tabulates an operation from an evaluation closure.
    ///
    /// The closure is invoked on every argument tuple in lexicographic order
    /// and must return in-range values.
    pub fn from_fn(
        universe: usize,
        arity: usize,
        f: impl Fn(&[usize]) -> usize,
    ) -> Result<Self, UaError> {
        if universe == 0 {
            return Err(UaError::invalid_argument(
                "empty-universe",
                "operations require a non-empty universe",
            ));
        }
        let mut table = Vec::with_capacity(universe.pow(arity as u32));
        let mut args = vec![0usize; arity];
        loop {
            table.push(f(&args));
            if !advance(&mut args, universe) {
                break;
            }
        }
        Self::new(universe, arity, table)
    }

    /// Returns the universe size the table was built for.
    pub fn universe_size(&self) -> usize {
        self.universe
    }

    /// Returns the flat value table.
    pub fn table(&self) -> &[usize] {
        &self.table
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

impl Operation for TableOp {
    fn arity(&self) -> usize {
        self.arity
    }

    fn value_at(&self, args: &[usize]) -> usize {
        let mut index = 0usize;
        for &arg in args {
            index = index * self.universe + arg;
        }
        self.table[index]
    }
}

/// Concrete algebra carrier backed by operation tables.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "TableAlgebraRepr", into = "TableAlgebraRepr")]
pub struct TableAlgebra {
    size: usize,
    ops: Vec<Box<dyn Operation>>,
    tables: Vec<TableOp>,
}

impl std::fmt::Debug for TableAlgebra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableAlgebra")
            .field("size", &self.size)
            .field("tables", &self.tables)
            .finish()
    }
}

impl Clone for TableAlgebra {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            ops: self
                .tables
                .iter()
                .map(|op| Box::new(op.clone()) as Box<dyn Operation>)
                .collect(),
            tables: self.tables.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TableAlgebraRepr {
    size: usize,
    tables: Vec<TableOp>,
}

impl TableAlgebra {
    /// Creates an algebra from a universe size and operation tables.
    ///
    /// Every table must have been built for the same universe size.
    pub fn new(size: usize, tables: Vec<TableOp>) -> Result<Self, UaError> {
        if size == 0 {
            return Err(UaError::invalid_argument(
                "empty-universe",
                "algebras require a non-empty universe",
            ));
        }
        for (idx, op) in tables.iter().enumerate() {
            if op.universe_size() != size {
                return Err(UaError::InvalidArgument(
                    ErrorInfo::new("universe-mismatch", "operation built for a different universe")
                        .with_context("operation", idx)
                        .with_context("operation_universe", op.universe_size())
                        .with_context("algebra_universe", size),
                ));
            }
        }
        let ops = tables
            .iter()
            .map(|op| Box::new(op.clone()) as Box<dyn Operation>)
            .collect();
        Ok(Self { size, ops, tables })
    }

    /// Returns the stored operation tables in declaration order.
    pub fn tables(&self) -> &[TableOp] {
        &self.tables
    }
}

impl TryFrom<TableAlgebraRepr> for TableAlgebra {
    type Error = UaError;

    fn try_from(repr: TableAlgebraRepr) -> Result<Self, Self::Error> {
        TableAlgebra::new(repr.size, repr.tables)
    }
}

impl From<TableAlgebra> for TableAlgebraRepr {
    fn from(alg: TableAlgebra) -> Self {
        Self {
            size: alg.size,
            tables: alg.tables,
        }
    }
}

impl PartialEq for TableAlgebra {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.tables == other.tables
    }
}

impl Eq for TableAlgebra {}

impl Algebra for TableAlgebra {
    fn universe_size(&self) -> usize {
        self.size
    }

    fn operations(&self) -> &[Box<dyn Operation>] {
        &self.ops
    }
}
