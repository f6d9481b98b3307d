use ua_part::Partition;

#[test]
fn zero_has_all_singletons() {
    let zero = Partition::zero(5);
    assert_eq!(zero.number_of_blocks(), 5);
    assert!(!zero.is_related(0, 1));
}

#[test]
fn one_has_a_single_block() {
    let one = Partition::one(5);
    assert_eq!(one.number_of_blocks(), 1);
    assert!(one.is_related(0, 4));
}

#[test]
fn union_by_size_merges_once() {
    let mut part = Partition::zero(4);
    assert!(part.union(0, 1));
    assert!(!part.union(1, 0));
    assert!(part.union(2, 3));
    assert_eq!(part.number_of_blocks(), 2);
    assert!(part.is_related(0, 1));
    assert!(!part.is_related(1, 2));
}

#[test]
fn blocks_are_ordered_by_least_element() {
    let mut part = Partition::zero(5);
    part.union(3, 1);
    part.union(4, 2);
    assert_eq!(part.blocks(), vec![vec![0], vec![1, 3], vec![2, 4]]);
}

#[test]
fn leq_tracks_refinement() {
    let mut fine = Partition::zero(4);
    fine.union(0, 1);
    let mut coarse = Partition::zero(4);
    coarse.union(0, 1);
    coarse.union(2, 3);
    assert!(fine.leq(&coarse).unwrap());
    assert!(!coarse.leq(&fine).unwrap());
    assert!(Partition::zero(4).leq(&fine).unwrap());
    assert!(fine.leq(&Partition::one(4)).unwrap());
}

#[test]
fn join_is_the_least_upper_bound() {
    let mut left = Partition::zero(4);
    left.union(0, 1);
    let mut right = Partition::zero(4);
    right.union(1, 2);
    let join = left.join(&right).unwrap();
    assert!(join.is_related(0, 2));
    assert!(!join.is_related(0, 3));
    assert!(left.leq(&join).unwrap());
    assert!(right.leq(&join).unwrap());
}

#[test]
fn meet_relates_iff_related_in_both() {
    let mut left = Partition::zero(5);
    left.union(0, 1);
    left.union(1, 2);
    let mut right = Partition::zero(5);
    right.union(1, 2);
    right.union(3, 4);
    let meet = left.meet(&right).unwrap();
    for a in 0..5 {
        for b in 0..5 {
            assert_eq!(
                meet.is_related(a, b),
                left.is_related(a, b) && right.is_related(a, b),
                "meet disagrees at ({a}, {b})"
            );
        }
    }
}

#[test]
fn combinators_reject_mismatched_universes() {
    let small = Partition::zero(3);
    let big = Partition::zero(4);
    let err = small.join(&big).unwrap_err();
    assert_eq!(err.info().code, "size-mismatch");
    assert!(small.meet(&big).is_err());
    assert!(small.leq(&big).is_err());
}

#[test]
fn generating_pairs_recover_the_partition() {
    let mut part = Partition::zero(6);
    part.union(0, 2);
    part.union(2, 4);
    part.union(1, 5);
    let mut rebuilt = Partition::zero(6);
    for (a, b) in part.generating_pairs() {
        rebuilt.union(a, b);
    }
    assert_eq!(part, rebuilt);
}

#[test]
fn equality_ignores_union_order() {
    let mut forward = Partition::zero(4);
    forward.union(0, 1);
    forward.union(1, 2);
    let mut backward = Partition::zero(4);
    backward.union(2, 1);
    backward.union(1, 0);
    assert_eq!(forward, backward);
}
