//! Seeded random algebra generation for fuzz tests and benches.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

use crate::algebra::{TableAlgebra, TableOp};
use crate::errors::UaError;

/// Deterministic source of random operation tables.
///
/// The core algorithms use no randomness; this generator exists so that
/// random *inputs* are reproducible. A master seed covers a whole family of
/// algebras: each algebra is addressed by a substream label, and every
/// operation table inside it draws from its own `StdRng`, seeded by a
/// SipHash-1-3 digest of the master seed, the substream, the operation
/// index, and the table shape. The digest rule is stable across platforms,
/// so the same coordinates always produce the same table, independent of
/// how many tables were drawn before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgebraGen {
    master_seed: u64,
}

impl AlgebraGen {
    /// Creates a generator rooted at the given master seed.
    pub fn with_seed(master_seed: u64) -> Self {
        Self { master_seed }
    }

    fn table_seed(&self, substream: u64, op_index: u64, universe: u64, arity: u64) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        for word in [self.master_seed, substream, op_index, universe, arity] {
            hasher.write_u64(word);
        }
        hasher.finish()
    }

    /// Generates the algebra at the given substream label.
    ///
    /// One uniformly random total operation is produced per entry of
    /// `arities`, in order.
    pub fn algebra(
        &self,
        substream: u64,
        universe: usize,
        arities: &[usize],
    ) -> Result<TableAlgebra, UaError> {
        if universe == 0 {
            return Err(UaError::invalid_argument(
                "empty-universe",
                "random algebras require a non-empty universe",
            ));
        }
        let mut tables = Vec::with_capacity(arities.len());
        for (op_index, &arity) in arities.iter().enumerate() {
            let seed = self.table_seed(substream, op_index as u64, universe as u64, arity as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            let len = universe.pow(arity as u32);
            let table: Vec<usize> = (0..len).map(|_| rng.gen_range(0..universe)).collect();
            tables.push(TableOp::new(universe, arity, table)?);
        }
        TableAlgebra::new(universe, tables)
    }
}

/// Generates the substream-zero algebra of the given master seed.
pub fn gen_table_algebra(
    universe: usize,
    arities: &[usize],
    master_seed: u64,
) -> Result<TableAlgebra, UaError> {
    AlgebraGen::with_seed(master_seed).algebra(0, universe, arities)
}
