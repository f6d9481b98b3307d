//! The type finder: classification of join-irreducible congruences.

use std::collections::BTreeSet;

use itertools::Itertools;
use ua_clo::tuple_closure_within;
use ua_core::errors::{ErrorInfo, UaError};
use ua_core::{Algebra, Budget, TableAlgebra};
use ua_lat::CongruenceLattice;
use ua_part::{project_partition, quotient_algebra, Partition};

use crate::centrality::{BinaryRelation, CentralityData};
use crate::minset::minimal_sets;
use crate::polys::unary_polynomials;
use crate::subtrace::{has_involution, is_minimal_pair, minimize_pair, Subtrace};
use crate::TctType;

struct JiEntry {
    beta: Partition,
    alpha: Partition,
}

/// Classifies the join-irreducible congruences of an algebra.
///
/// A finder is initialized from a congruence lattice whose enumeration has
/// already been built; initialization freezes the join-irreducibles together
/// with their unique lower covers, and every query afterwards works against
/// that frozen table. All searching happens in the quotient by the lower
/// cover, where the covering pair becomes `0 ≺ beta`.
pub struct TypeFinder<'a> {
    algebra: &'a dyn Algebra,
    entries: Vec<JiEntry>,
}

impl<'a> std::fmt::Debug for TypeFinder<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeFinder")
            .field("universe_size", &self.algebra.universe_size())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<'a> TypeFinder<'a> {
    /// Creates a finder from a built congruence lattice.
    ///
    /// The lattice must already expose its join-irreducibles; handing over a
    /// lattice that has not been enumerated is an invalid argument, not a
    /// silent no-op.
    pub fn init(lattice: &CongruenceLattice<'a>) -> Result<Self, UaError> {
        if !lattice.is_built() {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("lattice-not-built", "congruence lattice has not been enumerated")
                    .with_hint("build the lattice (congruences() or build_within) before init"),
            ));
        }
        let mut entries = Vec::new();
        for &ji in lattice.join_irreducibles() {
            let lower = lattice.lower_covers(ji);
            let &[cover] = lower.as_slice() else {
                return Err(UaError::Unsupported(
                    ErrorInfo::new("missing-lower-cover", "join-irreducible without unique cover")
                        .with_context("element", ji)
                        .with_context("covers", lower.len()),
                ));
            };
            entries.push(JiEntry {
                beta: lattice.element(ji).clone(),
                alpha: lattice.element(cover).clone(),
            });
        }
        Ok(Self {
            algebra: lattice.algebra(),
            entries,
        })
    }

    /// Returns the frozen join-irreducible congruences, in lattice order.
    pub fn join_irreducibles(&self) -> Vec<&Partition> {
        self.entries.iter().map(|entry| &entry.beta).collect()
    }

    fn entry_for(&self, ji: &Partition) -> Result<&JiEntry, UaError> {
        self.entries
            .iter()
            .find(|entry| &entry.beta == ji)
            .ok_or_else(|| {
                UaError::InvalidArgument(
                    ErrorInfo::new("not-join-irreducible", "congruence is not a join-irreducible")
                        .with_context("blocks", ji.number_of_blocks()),
                )
            })
    }

    /// Returns the local type of a join-irreducible congruence.
    pub fn find_type(&self, ji: &Partition) -> Result<TctType, UaError> {
        self.find_type_within(ji, &mut Budget::unlimited())
    }

    /// Returns the local type of a join-irreducible congruence, under a budget.
    pub fn find_type_within(&self, ji: &Partition, budget: &mut Budget) -> Result<TctType, UaError> {
        let subtrace = self.find_subtrace_within(ji, budget)?;
        subtrace.tct_type.ok_or_else(|| {
            UaError::unsupported("untyped-subtrace", "subtrace search finished without a type")
        })
    }

    /// Returns the set of local types realized across all join-irreducibles.
    ///
    /// An algebra without join-irreducible congruences (a one-element
    /// algebra, or a collapsed lattice) realizes the empty set.
    pub fn find_type_set(&self) -> Result<BTreeSet<TctType>, UaError> {
        self.find_type_set_within(&mut Budget::unlimited())
    }

    /// Returns the realized type set, under a budget.
    pub fn find_type_set_within(&self, budget: &mut Budget) -> Result<BTreeSet<TctType>, UaError> {
        let mut types = BTreeSet::new();
        for entry in &self.entries {
            let subtrace = find_subtrace_for(self.algebra, entry, budget)?;
            if let Some(tct_type) = subtrace.tct_type {
                types.insert(tct_type);
            }
        }
        Ok(types)
    }

    /// Locates a subtrace witnessing the local type of a join-irreducible.
    pub fn find_subtrace(&self, ji: &Partition) -> Result<Subtrace, UaError> {
        self.find_subtrace_within(ji, &mut Budget::unlimited())
    }

    /// Locates a subtrace, under a budget.
    pub fn find_subtrace_within(
        &self,
        ji: &Partition,
        budget: &mut Budget,
    ) -> Result<Subtrace, UaError> {
        let entry = self.entry_for(ji)?;
        find_subtrace_for(self.algebra, entry, budget)
    }

    /// The subtrace predicate: whether a pair witnesses the join-irreducible.
    ///
    /// True exactly when the pair is related by the join-irreducible but not
    /// by its lower cover, and its polynomial closure in the quotient stays
    /// inside the two-element structure the pair generates.
    pub fn is_subtrace(&self, pair: (usize, usize), ji: &Partition) -> Result<bool, UaError> {
        self.is_subtrace_within(pair, ji, &mut Budget::unlimited())
    }

    /// The subtrace predicate, under a budget.
    pub fn is_subtrace_within(
        &self,
        pair: (usize, usize),
        ji: &Partition,
        budget: &mut Budget,
    ) -> Result<bool, UaError> {
        let n = self.algebra.universe_size();
        if pair.0 >= n || pair.1 >= n {
            return Err(UaError::InvalidArgument(
                ErrorInfo::new("element-range", "subtrace pair outside the universe")
                    .with_context("pair", format!("({}, {})", pair.0, pair.1))
                    .with_context("universe", n),
            ));
        }
        let entry = self.entry_for(ji)?;
        if !entry.beta.is_related(pair.0, pair.1) || entry.alpha.is_related(pair.0, pair.1) {
            return Ok(false);
        }
        let quotient = quotient_algebra(self.algebra, &entry.alpha)?;
        let beta_q = project_partition(&entry.alpha, &entry.beta)?;
        let block_of = entry.alpha.block_indices();
        let image = (block_of[pair.0], block_of[pair.1]);
        is_minimal_pair(&quotient, &beta_q, image, budget)
    }
}

fn find_subtrace_for(
    alg: &dyn Algebra,
    entry: &JiEntry,
    budget: &mut Budget,
) -> Result<Subtrace, UaError> {
    let quotient = quotient_algebra(alg, &entry.alpha)?;
    let beta_q = project_partition(&entry.alpha, &entry.beta)?;

    let polys = unary_polynomials(&quotient, budget)?;
    let sets = minimal_sets(&beta_q, &polys);
    let minimal = sets.first().ok_or_else(|| {
        UaError::unsupported("no-minimal-set", "no separating idempotent polynomial exists")
    })?;
    let trace = minimal.traces.first().ok_or_else(|| {
        UaError::unsupported("no-trace", "minimal set carries no nontrivial trace")
    })?;

    // First minimal pair inside the trace wins; if the trace holds none, walk
    // an arbitrary trace pair down to one.
    let mut witness = None;
    for (a, b) in trace.iter().copied().tuple_combinations() {
        if is_minimal_pair(&quotient, &beta_q, (a, b), budget)? {
            witness = Some((a, b));
            break;
        }
    }
    let (a, b) = match witness {
        Some(pair) => pair,
        None => minimize_pair(&quotient, &beta_q, (trace[0], trace[1]), budget)?,
    };

    let involution = has_involution(&quotient, (a, b), budget)?;
    let tct_type = classify(&quotient, &beta_q, (a, b), budget)?;

    // Report the pair through representatives of the collapsed blocks.
    let blocks = entry.alpha.blocks();
    Ok(Subtrace {
        first: blocks[a][0],
        second: blocks[b][0],
        tct_type: Some(tct_type),
        has_involution: involution,
    })
}

/// Decides the local type of a subtrace pair in the quotient.
///
/// Patterns are tested most restrictive first: the centrality of the pair
/// splits the abelian types {1, 2} from {3, 4, 5}; the Maltsev vector then
/// separates affine from unary and boolean from lattice; meet and join snag
/// vectors detect semilattice operations.
fn classify(
    quotient: &TableAlgebra,
    beta_q: &Partition,
    pair: (usize, usize),
    budget: &mut Budget,
) -> Result<TctType, UaError> {
    let m = quotient.universe_size();
    let data = CentralityData::new(
        BinaryRelation::from_pairs(m, [pair])?,
        BinaryRelation::from_partition(beta_q),
        Partition::zero(m),
    )?;
    if data.is_central_within(quotient, pair, budget)? {
        if admits_maltsev(quotient, pair, budget)? {
            return Ok(TctType::Affine);
        }
        return Ok(TctType::Unary);
    }

    let (meet_snag, join_snag) = snags(quotient, pair, budget)?;
    match (meet_snag, join_snag) {
        (true, true) => {
            if admits_maltsev(quotient, pair, budget)? {
                Ok(TctType::Boolean)
            } else {
                Ok(TctType::Lattice)
            }
        }
        (true, false) | (false, true) => Ok(TctType::Semilattice),
        (false, false) => {
            if admits_maltsev(quotient, pair, budget)? {
                Ok(TctType::Affine)
            } else {
                Ok(TctType::Unary)
            }
        }
    }
}

/// Searches the binary polynomial vectors on the pair for semilattice snags.
///
/// Vectors list values on the argument pairs `(aa, ab, ba, bb)`; the meet
/// snag is `(a, a, a, b)` (the pair's first element absorbing) and the join
/// snag is `(a, b, b, b)` (the second absorbing).
fn snags(
    quotient: &TableAlgebra,
    (a, b): (usize, usize),
    budget: &mut Budget,
) -> Result<(bool, bool), UaError> {
    let m = quotient.universe_size();
    let mut seeds: Vec<Vec<usize>> = vec![vec![a, a, b, b], vec![a, b, a, b]];
    seeds.extend((0..m).map(|c| vec![c; 4]));
    let vectors = tuple_closure_within(quotient, 4, &seeds, budget).map_err(UaError::from)?;
    let meet_snag = vectors.contains(&vec![a, a, a, b]);
    let join_snag = vectors.contains(&vec![a, b, b, b]);
    Ok((meet_snag, join_snag))
}

/// Tests for a Maltsev vector on the pair.
///
/// Over the six argument tuples where the Maltsev equations constrain a
/// ternary polynomial, the vector of required values must be reachable in
/// the closure of the three projection vectors and the constants.
fn admits_maltsev(
    quotient: &TableAlgebra,
    (a, b): (usize, usize),
    budget: &mut Budget,
) -> Result<bool, UaError> {
    let m = quotient.universe_size();
    // Argument tuples: (aaa, aab, abb, baa, bba, bbb).
    let mut seeds: Vec<Vec<usize>> = vec![
        vec![a, a, a, b, b, b],
        vec![a, a, b, a, b, b],
        vec![a, b, b, a, a, b],
    ];
    seeds.extend((0..m).map(|c| vec![c; 6]));
    let vectors = tuple_closure_within(quotient, 6, &seeds, budget).map_err(UaError::from)?;
    // p(x, y, y) = x and p(x, x, y) = y forces (a, b, a, b, a, b).
    Ok(vectors.contains(&vec![a, b, a, b, a, b]))
}
