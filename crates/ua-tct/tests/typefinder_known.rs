use std::collections::BTreeSet;

use ua_lat::CongruenceLattice;
use ua_tct::{TctType, TypeFinder};


#[test]
fn chain_realizes_lattice_type() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    let types = finder.find_type_set().unwrap();
    assert_eq!(types, BTreeSet::from([TctType::Lattice]));
    for ji in finder.join_irreducibles() {
        assert_eq!(finder.find_type(ji).unwrap().code(), 4);
    }
}

#[test]
fn xor_algebra_realizes_affine_type() {
    let alg = fixtures::xor_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    // The two-element xor algebra is the degenerate scenario: a two-element
    // congruence lattice with a single, trivially join-irreducible top. The
    // finder answers without error.
    let types = finder.find_type_set().unwrap();
    assert_eq!(types, BTreeSet::from([TctType::Affine]));
}

#[test]
fn meet_semilattice_realizes_semilattice_type() {
    let alg = fixtures::meet_semilattice();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    assert_eq!(
        finder.find_type_set().unwrap(),
        BTreeSet::from([TctType::Semilattice])
    );
}

#[test]
fn boolean_algebra_realizes_boolean_type() {
    let alg = fixtures::boolean_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    assert_eq!(
        finder.find_type_set().unwrap(),
        BTreeSet::from([TctType::Boolean])
    );
}

#[test]
fn bare_set_realizes_unary_type() {
    let alg = fixtures::bare_set(2);
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    assert_eq!(
        finder.find_type_set().unwrap(),
        BTreeSet::from([TctType::Unary])
    );
}

#[test]
fn affine_z3_realizes_affine_type() {
    let alg = fixtures::affine_z3();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    assert_eq!(
        finder.find_type_set().unwrap(),
        BTreeSet::from([TctType::Affine])
    );
}

#[test]
fn type_set_agrees_with_per_ji_types() {
    for alg in [
        fixtures::chain_algebra(),
        fixtures::xor_algebra(),
        fixtures::boolean_algebra(),
        fixtures::meet_semilattice(),
    ] {
        let lattice = CongruenceLattice::new(&alg);
        lattice.congruences();
        let finder = TypeFinder::init(&lattice).unwrap();
        let mut collected = BTreeSet::new();
        for ji in finder.join_irreducibles() {
            collected.insert(finder.find_type(ji).unwrap());
        }
        assert_eq!(finder.find_type_set().unwrap(), collected);
    }
}

#[test]
fn subtrace_carries_type_and_involution() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    for ji in finder.join_irreducibles() {
        let subtrace = finder.find_subtrace(ji).unwrap();
        assert_eq!(subtrace.tct_type, Some(TctType::Lattice));
        // Monotone polynomials cannot swap a comparable pair.
        assert!(!subtrace.has_involution);
        assert!(ji.is_related(subtrace.first, subtrace.second));
        assert_ne!(subtrace.first, subtrace.second);
    }
}

#[test]
fn xor_subtrace_has_an_involution() {
    let alg = fixtures::xor_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    let jis = finder.join_irreducibles();
    let subtrace = finder.find_subtrace(jis[0]).unwrap();
    assert!(subtrace.has_involution);
}
