#![deny(missing_docs)]
#![doc = "Congruence and subalgebra lattices: lazy enumeration, covering \
relations, join- and meet-irreducibles, fingerprints, and report export."]

pub mod conlat;
pub mod hash;
pub mod order;
pub mod report;
pub mod sublat;
pub mod sweep;

pub use conlat::CongruenceLattice;
pub use hash::{conlat_fingerprint, sublat_fingerprint};
pub use order::OrderRelation;
pub use report::{ConLatReport, SubLatReport};
pub use sublat::SubalgebraLattice;
pub use sweep::principal_sweep;
