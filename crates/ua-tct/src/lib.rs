#![deny(missing_docs)]
#![doc = "Tame congruence theory: minimal sets, subtraces, centrality, and \
the classification of join-irreducible congruences into the five local \
types."]

pub mod centrality;
pub mod minset;
pub mod polys;
pub mod subtrace;
pub mod typefinder;

pub use centrality::{BinaryRelation, CentralityData};
pub use subtrace::Subtrace;
pub use typefinder::TypeFinder;

use serde::{Deserialize, Serialize};

/// The five local behaviors of tame congruence theory.
///
/// The numeric codes are the conventional type numbers: 1 unary, 2 affine,
/// 3 boolean, 4 lattice, 5 semilattice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TctType {
    /// Essentially unary local behavior (a G-set).
    Unary,
    /// Affine local behavior (a one-dimensional vector space).
    Affine,
    /// Boolean local behavior (a two-element boolean algebra).
    Boolean,
    /// Lattice local behavior (a two-element lattice).
    Lattice,
    /// Semilattice local behavior (a two-element semilattice).
    Semilattice,
}

impl TctType {
    /// Returns the conventional numeric code of the type.
    pub fn code(self) -> u8 {
        match self {
            TctType::Unary => 1,
            TctType::Affine => 2,
            TctType::Boolean => 3,
            TctType::Lattice => 4,
            TctType::Semilattice => 5,
        }
    }

    /// Returns the type with the given conventional code, if any.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TctType::Unary),
            2 => Some(TctType::Affine),
            3 => Some(TctType::Boolean),
            4 => Some(TctType::Lattice),
            5 => Some(TctType::Semilattice),
            _ => None,
        }
    }
}

impl std::fmt::Display for TctType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TctType::Unary => "unary",
            TctType::Affine => "affine",
            TctType::Boolean => "boolean",
            TctType::Lattice => "lattice",
            TctType::Semilattice => "semilattice",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
