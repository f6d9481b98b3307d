use ua_lat::SubalgebraLattice;


#[test]
fn chain_subsets_are_all_subuniverses() {
    // max and min never leave a subset, so every subset of the chain is
    // closed: 8 subuniverses including the empty one.
    let alg = fixtures::chain_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    assert_eq!(lattice.subalgebras().len(), 8);
    assert_eq!(lattice.zero().unwrap(), Vec::<usize>::new());
    assert_eq!(lattice.one(), vec![0, 1, 2]);
}

#[test]
fn generate_validates_and_closes() {
    let alg = fixtures::cyclic_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    assert_eq!(lattice.generate(&[2]).unwrap(), vec![0, 1, 2, 3]);
    let err = lattice.generate(&[9]).unwrap_err();
    assert_eq!(err.info().code, "element-range");
}

#[test]
fn constants_force_a_single_subuniverse() {
    // The origin constant plus the successor reach the whole universe from
    // any seed, so the lattice collapses to a point.
    let alg = fixtures::cyclic_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    assert_eq!(lattice.subalgebras().len(), 1);
    assert!(lattice.covers().is_empty());
    assert!(lattice.join_irreducibles().is_empty());
    assert!(lattice.meet_irreducibles().is_empty());
}

#[test]
fn join_is_generation_and_meet_is_intersection() {
    let alg = fixtures::chain_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    let left = vec![0usize, 1];
    let right = vec![1usize, 2];
    assert_eq!(lattice.join(&left, &right).unwrap(), vec![0, 1, 2]);
    assert_eq!(lattice.meet(&left, &right).unwrap(), vec![1]);
}

#[test]
fn chain_irreducibles_match_the_powerset_shape() {
    let alg = fixtures::chain_algebra();
    let lattice = SubalgebraLattice::new(&alg);

    // Join-irreducibles of the powerset are the singletons.
    let jis: Vec<&[usize]> = lattice
        .join_irreducibles()
        .iter()
        .map(|&idx| lattice.element(idx))
        .collect();
    assert_eq!(jis.len(), 3);
    assert!(jis.iter().all(|sub| sub.len() == 1));

    // Meet-irreducibles are the two-element sets.
    let mis: Vec<&[usize]> = lattice
        .meet_irreducibles()
        .iter()
        .map(|&idx| lattice.element(idx))
        .collect();
    assert_eq!(mis.len(), 3);
    assert!(mis.iter().all(|sub| sub.len() == 2));
}

#[test]
fn covering_pairs_follow_inclusion() {
    let alg = fixtures::chain_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    for &(lower, upper) in lattice.covers() {
        let small = lattice.element(lower);
        let big = lattice.element(upper);
        assert_eq!(small.len() + 1, big.len());
        assert!(small.iter().all(|e| big.contains(e)));
    }
}

#[test]
fn index_of_finds_frozen_elements() {
    let alg = fixtures::chain_algebra();
    let lattice = SubalgebraLattice::new(&alg);
    let idx = lattice.index_of(&[0, 2]).unwrap();
    assert_eq!(lattice.element(idx), &[0, 2]);
    assert!(lattice.index_of(&[0, 1, 2, 3]).is_none());
}
