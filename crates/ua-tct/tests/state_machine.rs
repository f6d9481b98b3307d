use ua_core::UaError;
use ua_lat::CongruenceLattice;
use ua_part::Partition;
use ua_tct::TypeFinder;


#[test]
fn init_requires_a_built_lattice() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    let err = TypeFinder::init(&lattice).unwrap_err();
    match err {
        UaError::InvalidArgument(info) => {
            assert_eq!(info.code, "lattice-not-built");
            assert!(info.hint.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }

    lattice.congruences();
    TypeFinder::init(&lattice).unwrap();
}

#[test]
fn queries_reject_non_join_irreducibles() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    // zero is never join-irreducible; one has two lower covers in the chain.
    let err = finder.find_type(&Partition::zero(3)).unwrap_err();
    assert_eq!(err.info().code, "not-join-irreducible");
    let err = finder.find_subtrace(&Partition::one(3)).unwrap_err();
    assert_eq!(err.info().code, "not-join-irreducible");
}

#[test]
fn is_subtrace_validates_range_and_membership() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    let jis = finder.join_irreducibles();
    let ji = jis[0].clone();

    let err = finder.is_subtrace((0, 9), &ji).unwrap_err();
    assert_eq!(err.info().code, "element-range");

    let err = finder.is_subtrace((0, 1), &Partition::zero(3)).unwrap_err();
    assert_eq!(err.info().code, "not-join-irreducible");
}

#[test]
fn subtraces_verify_against_the_predicate() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    for ji in finder.join_irreducibles() {
        let subtrace = finder.find_subtrace(ji).unwrap();
        assert!(finder
            .is_subtrace((subtrace.first, subtrace.second), ji)
            .unwrap());
    }
}

#[test]
fn pairs_outside_the_covering_gap_are_not_subtraces() {
    let alg = fixtures::chain_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();

    // Locate the join-irreducible that relates 0 and 1.
    let jis = finder.join_irreducibles();
    let ji = jis
        .iter()
        .find(|theta| theta.is_related(0, 1))
        .copied()
        .unwrap()
        .clone();

    // (0, 2) is not related by this congruence at all.
    assert!(!finder.is_subtrace((0, 2), &ji).unwrap());
    // A pair inside the lower cover (here: equal elements) is not a witness.
    assert!(!finder.is_subtrace((1, 1), &ji).unwrap());
}

#[test]
fn repeated_queries_answer_identically() {
    let alg = fixtures::boolean_algebra();
    let lattice = CongruenceLattice::new(&alg);
    lattice.congruences();
    let finder = TypeFinder::init(&lattice).unwrap();
    let first = finder.find_type_set().unwrap();
    let second = finder.find_type_set().unwrap();
    assert_eq!(first, second);
}
