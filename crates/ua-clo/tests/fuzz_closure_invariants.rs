use proptest::prelude::*;
use ua_clo::{congruence_closure, subuniverse_closure};
use ua_core::gen::gen_table_algebra;
use ua_part::{verify_congruence, Partition};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_closures_are_congruences(seed in any::<u64>(), a in 0usize..4, b in 0usize..4) {
        let alg = gen_table_algebra(4, &[2, 1], seed).unwrap();
        let theta = congruence_closure(&alg, &[(a, b)]).unwrap();

        prop_assert!(theta.is_related(a, b));
        verify_congruence(&alg, &theta).unwrap();
        prop_assert!(Partition::zero(4).leq(&theta).unwrap());

        // Re-closing the generating pairs reaches the same fixed point.
        let again = congruence_closure(&alg, &theta.generating_pairs()).unwrap();
        prop_assert_eq!(theta, again);
    }

    #[test]
    fn random_runs_are_reproducible(seed in any::<u64>()) {
        let alg_a = gen_table_algebra(5, &[2], seed).unwrap();
        let alg_b = gen_table_algebra(5, &[2], seed).unwrap();
        let theta_a = congruence_closure(&alg_a, &[(0, 3)]).unwrap();
        let theta_b = congruence_closure(&alg_b, &[(0, 3)]).unwrap();
        prop_assert_eq!(theta_a.to_array(), theta_b.to_array());
    }

    #[test]
    fn subuniverses_are_closed_under_every_operation(seed in any::<u64>(), start in 0usize..4) {
        let alg = gen_table_algebra(4, &[2], seed).unwrap();
        let sub = subuniverse_closure(&alg, &[start]).unwrap();

        prop_assert!(sub.contains(&start));
        let op = &alg.tables()[0];
        for &x in &sub {
            for &y in &sub {
                let image = op.table()[x * 4 + y];
                prop_assert!(sub.contains(&image), "Sg not closed: {x} op {y} = {image}");
            }
        }

        // Generating from the closure itself is a fixed point.
        let again = subuniverse_closure(&alg, &sub).unwrap();
        prop_assert_eq!(sub, again);
    }
}
