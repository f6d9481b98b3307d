//! Serializable lattice reports for downstream diagram export.

use serde::{Deserialize, Serialize};

use ua_core::errors::{ErrorInfo, UaError};

use crate::conlat::CongruenceLattice;
use crate::hash::{conlat_fingerprint, sublat_fingerprint};
use crate::sublat::SubalgebraLattice;

/// Frozen summary of a congruence lattice.
///
/// Elements are canonical partition arrays; the covering pairs index into
/// the element list. Diagram exporters and other collaborators consume this
/// instead of the live lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConLatReport {
    /// Universe size of the underlying algebra.
    pub universe_size: usize,
    /// Canonical arrays of every congruence, in element order.
    pub elements: Vec<Vec<i64>>,
    /// Covering pairs `(lower, upper)` over element indices.
    pub covering_pairs: Vec<(usize, usize)>,
    /// Indices of the join-irreducible congruences.
    pub join_irreducibles: Vec<usize>,
    /// Indices of the meet-irreducible congruences.
    pub meet_irreducibles: Vec<usize>,
    /// Canonical fingerprint of the frozen lattice.
    pub fingerprint: String,
}

impl ConLatReport {
    /// Captures a report from a lattice, building it if needed.
    pub fn capture(lattice: &CongruenceLattice<'_>) -> Self {
        Self {
            universe_size: lattice.algebra().universe_size(),
            elements: lattice
                .congruences()
                .iter()
                .map(|theta| theta.to_array())
                .collect(),
            covering_pairs: lattice.covers().to_vec(),
            join_irreducibles: lattice.join_irreducibles().to_vec(),
            meet_irreducibles: lattice.meet_irreducibles().to_vec(),
            fingerprint: conlat_fingerprint(lattice),
        }
    }

    /// Serializes the report into indented JSON.
    pub fn to_json(&self) -> Result<String, UaError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            UaError::InvalidArgument(ErrorInfo::new("report-serialize", err.to_string()))
        })
    }

    /// Deserializes a report from JSON text.
    pub fn from_json(json: &str) -> Result<Self, UaError> {
        serde_json::from_str(json).map_err(|err| {
            UaError::InvalidArgument(ErrorInfo::new("report-deserialize", err.to_string()))
        })
    }
}

/// Frozen summary of a subalgebra lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLatReport {
    /// Universe size of the underlying algebra.
    pub universe_size: usize,
    /// Sorted element lists of every subuniverse, in element order.
    pub elements: Vec<Vec<usize>>,
    /// Covering pairs `(lower, upper)` over element indices.
    pub covering_pairs: Vec<(usize, usize)>,
    /// Indices of the join-irreducible subuniverses.
    pub join_irreducibles: Vec<usize>,
    /// Indices of the meet-irreducible subuniverses.
    pub meet_irreducibles: Vec<usize>,
    /// Canonical fingerprint of the frozen lattice.
    pub fingerprint: String,
}

impl SubLatReport {
    /// Captures a report from a lattice, building it if needed.
    pub fn capture(lattice: &SubalgebraLattice<'_>) -> Self {
        Self {
            universe_size: lattice.algebra().universe_size(),
            elements: lattice.subalgebras().to_vec(),
            covering_pairs: lattice.covers().to_vec(),
            join_irreducibles: lattice.join_irreducibles().to_vec(),
            meet_irreducibles: lattice.meet_irreducibles().to_vec(),
            fingerprint: sublat_fingerprint(lattice),
        }
    }

    /// Serializes the report into indented JSON.
    pub fn to_json(&self) -> Result<String, UaError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            UaError::InvalidArgument(ErrorInfo::new("report-serialize", err.to_string()))
        })
    }

    /// Deserializes a report from JSON text.
    pub fn from_json(json: &str) -> Result<Self, UaError> {
        serde_json::from_str(json).map_err(|err| {
            UaError::InvalidArgument(ErrorInfo::new("report-deserialize", err.to_string()))
        })
    }
}
