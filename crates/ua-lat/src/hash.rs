//! Canonical fingerprints of frozen lattices.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::conlat::CongruenceLattice;
use crate::sublat::SubalgebraLattice;

#[derive(Serialize)]
struct FingerprintPayload<E: Serialize> {
    elements: Vec<E>,
    covers: Vec<(usize, usize)>,
}

fn digest<E: Serialize>(payload: &FingerprintPayload<E>) -> String {
    // Canonical element order makes the JSON encoding stable, so the digest
    // identifies the lattice across runs and worker counts.
    let bytes = serde_json::to_vec(payload).expect("fingerprint payload serializes");
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}

/// Computes the canonical fingerprint of a congruence lattice.
///
/// Builds the lattice if it is not frozen yet.
pub fn conlat_fingerprint(lattice: &CongruenceLattice<'_>) -> String {
    let payload = FingerprintPayload {
        elements: lattice
            .congruences()
            .iter()
            .map(|theta| theta.to_array())
            .collect(),
        covers: lattice.covers().to_vec(),
    };
    digest(&payload)
}

/// Computes the canonical fingerprint of a subalgebra lattice.
///
/// Builds the lattice if it is not frozen yet.
pub fn sublat_fingerprint(lattice: &SubalgebraLattice<'_>) -> String {
    let payload = FingerprintPayload {
        elements: lattice.subalgebras().to_vec(),
        covers: lattice.covers().to_vec(),
    };
    digest(&payload)
}
