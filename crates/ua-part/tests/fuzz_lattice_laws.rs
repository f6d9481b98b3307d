use proptest::prelude::*;
use ua_part::Partition;

fn partition_from_unions(n: usize, unions: &[(usize, usize)]) -> Partition {
    let mut part = Partition::zero(n);
    for &(a, b) in unions {
        part.union(a % n, b % n);
    }
    part
}

proptest! {
    #[test]
    fn join_and_meet_satisfy_lattice_laws(
        n in 2usize..8,
        left in proptest::collection::vec((0usize..8, 0usize..8), 0..10),
        right in proptest::collection::vec((0usize..8, 0usize..8), 0..10),
    ) {
        let p = partition_from_unions(n, &left);
        let q = partition_from_unions(n, &right);

        let join = p.join(&q).unwrap();
        let meet = p.meet(&q).unwrap();

        prop_assert_eq!(&join, &q.join(&p).unwrap());
        prop_assert_eq!(&meet, &q.meet(&p).unwrap());

        prop_assert!(p.leq(&join).unwrap());
        prop_assert!(q.leq(&join).unwrap());
        prop_assert!(meet.leq(&p).unwrap());
        prop_assert!(meet.leq(&q).unwrap());

        // absorption
        prop_assert_eq!(&p.join(&meet).unwrap(), &p);
        prop_assert_eq!(&p.meet(&join).unwrap(), &p);

        // bounds
        prop_assert!(Partition::zero(n).leq(&p).unwrap());
        prop_assert!(p.leq(&Partition::one(n)).unwrap());
    }

    #[test]
    fn export_roundtrips_for_reachable_partitions(
        n in 1usize..9,
        unions in proptest::collection::vec((0usize..9, 0usize..9), 0..12),
    ) {
        let part = partition_from_unions(n, &unions);
        let restored = Partition::from_array(part.to_array()).unwrap();
        prop_assert_eq!(&part, &restored);
        prop_assert_eq!(part.number_of_blocks(), restored.number_of_blocks());
    }

    #[test]
    fn meet_relates_iff_both_relate(
        n in 2usize..7,
        left in proptest::collection::vec((0usize..7, 0usize..7), 0..8),
        right in proptest::collection::vec((0usize..7, 0usize..7), 0..8),
        a in 0usize..7,
        b in 0usize..7,
    ) {
        let p = partition_from_unions(n, &left);
        let q = partition_from_unions(n, &right);
        let meet = p.meet(&q).unwrap();
        let (a, b) = (a % n, b % n);
        prop_assert_eq!(
            meet.is_related(a, b),
            p.is_related(a, b) && q.is_related(a, b)
        );
    }
}
