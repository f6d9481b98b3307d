//! Minimal sets and traces of a covering pair of congruences.

use std::collections::{BTreeMap, BTreeSet};

use ua_part::Partition;

use crate::polys::{is_idempotent, range_of};

/// A minimal set together with its idempotent witness and its traces.
///
/// Computed in the quotient by the lower congruence, where the covering
/// pair becomes `0 ≺ beta`: the set is an inclusion-minimal range of an
/// idempotent unary polynomial that still separates some `beta`-class, and
/// the traces are its intersections with the `beta`-classes that keep at
/// least two elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalSet {
    /// The elements of the minimal set, sorted.
    pub elements: Vec<usize>,
    /// An idempotent unary polynomial whose range is the set.
    pub idempotent: Vec<usize>,
    /// Nontrivial intersections with `beta`-classes, sorted by least element.
    pub traces: Vec<Vec<usize>>,
}

/// Returns whether the map keeps some distinct `beta`-related pair distinct.
pub fn separates(map: &[usize], beta: &Partition) -> bool {
    let n = map.len();
    for a in 0..n {
        for b in (a + 1)..n {
            if beta.is_related(a, b) && map[a] != map[b] {
                return true;
            }
        }
    }
    false
}

/// Locates the minimal sets of `0 ≺ beta` among the given unary polynomials.
///
/// Candidates are ranges of idempotent separating polynomials; the
/// inclusion-minimal candidates survive. The result is sorted by
/// `(size, elements)` so the first entry is the canonical choice.
pub fn minimal_sets(beta: &Partition, polys: &BTreeSet<Vec<usize>>) -> Vec<MinimalSet> {
    let mut candidates: BTreeMap<(usize, Vec<usize>), Vec<usize>> = BTreeMap::new();
    for poly in polys {
        if !is_idempotent(poly) || !separates(poly, beta) {
            continue;
        }
        let range = range_of(poly);
        candidates
            .entry((range.len(), range))
            .or_insert_with(|| poly.clone());
    }

    let mut minimal = Vec::new();
    for ((size, range), witness) in &candidates {
        let properly_contains_another = candidates.keys().any(|(other_size, other)| {
            other_size < size && other.iter().all(|e| range.contains(e))
        });
        if properly_contains_another {
            continue;
        }
        minimal.push(MinimalSet {
            traces: traces_of(range, beta),
            elements: range.clone(),
            idempotent: witness.clone(),
        });
    }
    minimal
}

fn traces_of(range: &[usize], beta: &Partition) -> Vec<Vec<usize>> {
    let mut traces = Vec::new();
    let mut seen_roots = BTreeSet::new();
    for &element in range {
        let root = beta.find(element);
        if !seen_roots.insert(root) {
            continue;
        }
        let trace: Vec<usize> = range
            .iter()
            .copied()
            .filter(|&other| beta.is_related(element, other))
            .collect();
        if trace.len() >= 2 {
            traces.push(trace);
        }
    }
    traces
}
