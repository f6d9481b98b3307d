use ua_clo::{subuniverse_closure, tuple_closure};


#[test]
fn chain_subsets_are_already_closed() {
    let alg = fixtures::chain_algebra();
    assert_eq!(subuniverse_closure(&alg, &[0, 2]).unwrap(), vec![0, 2]);
    assert_eq!(subuniverse_closure(&alg, &[1]).unwrap(), vec![1]);
}

#[test]
fn constants_seed_the_empty_closure() {
    let alg = fixtures::cyclic_algebra();
    // Sg(∅) picks up the constant 0 and closes under successor.
    assert_eq!(subuniverse_closure(&alg, &[]).unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn empty_closure_without_constants_is_empty() {
    let alg = fixtures::chain_algebra();
    assert!(subuniverse_closure(&alg, &[]).unwrap().is_empty());
}

#[test]
fn seed_is_deduplicated_and_sorted() {
    let alg = fixtures::bare_set(5);
    assert_eq!(subuniverse_closure(&alg, &[3, 1, 3, 1]).unwrap(), vec![1, 3]);
}

#[test]
fn seed_out_of_range_is_rejected() {
    let alg = fixtures::bare_set(3);
    let err = subuniverse_closure(&alg, &[4]).unwrap_err();
    assert_eq!(err.info().code, "element-range");
}

#[test]
fn tuple_closure_tracks_componentwise_images() {
    let alg = fixtures::xor_algebra();
    let closure = tuple_closure(&alg, 2, &[vec![0, 1], vec![0, 0], vec![1, 1]]).unwrap();
    // xor of (0,1) with (1,1) flips both components.
    assert!(closure.contains(&vec![1, 0]));
    assert_eq!(closure.len(), 4);
}

#[test]
fn tuple_closure_validates_width() {
    let alg = fixtures::xor_algebra();
    let err = tuple_closure(&alg, 2, &[vec![0, 1, 0]]).unwrap_err();
    assert_eq!(err.info().code, "width-mismatch");
    let err = tuple_closure(&alg, 0, &[]).unwrap_err();
    assert_eq!(err.info().code, "empty-width");
}

#[test]
fn tuple_closure_includes_constant_tuples() {
    let alg = fixtures::cyclic_algebra();
    let closure = tuple_closure(&alg, 3, &[]).unwrap();
    // The nullary origin contributes (0,0,0); successor walks it around.
    assert!(closure.contains(&vec![0, 0, 0]));
    assert!(closure.contains(&vec![3, 3, 3]));
    assert_eq!(closure.len(), 4);
}
