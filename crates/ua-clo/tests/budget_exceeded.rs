use ua_clo::{congruence_closure_within, subuniverse_closure_within, tuple_closure_within};
use ua_core::{Budget, UaError};


#[test]
fn congruence_closure_carries_partial_partition() {
    let alg = fixtures::chain_algebra();
    let mut budget = Budget::with_limit(1);
    let interrupted = congruence_closure_within(&alg, &[(0, 2)], &mut budget).unwrap_err();
    match &interrupted.error {
        UaError::ResourceExceeded(info) => {
            assert_eq!(info.code, "budget-exhausted");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // The seed union already happened; the partial is a genuine
    // under-approximation of the closure.
    assert!(interrupted.partial.is_related(0, 2));
    assert!(interrupted.partial.number_of_blocks() <= 2);
}

#[test]
fn subuniverse_closure_carries_partial_set() {
    let alg = fixtures::cyclic_algebra();
    let mut budget = Budget::with_limit(2);
    let interrupted = subuniverse_closure_within(&alg, &[1], &mut budget).unwrap_err();
    assert!(matches!(interrupted.error, UaError::ResourceExceeded(_)));
    assert!(interrupted.partial.contains(&1));
    assert!(interrupted.partial.len() < 4);
}

#[test]
fn tuple_closure_carries_partial_members() {
    let alg = fixtures::xor_algebra();
    let mut budget = Budget::with_limit(3);
    let interrupted =
        tuple_closure_within(&alg, 2, &[vec![0, 1], vec![1, 1]], &mut budget).unwrap_err();
    assert!(matches!(interrupted.error, UaError::ResourceExceeded(_)));
    assert!(interrupted.partial.contains(&vec![0, 1]));
}

#[test]
fn sufficient_budget_completes_and_reports_spend() {
    let alg = fixtures::chain_algebra();
    let mut budget = Budget::with_limit(10_000);
    let theta = congruence_closure_within(&alg, &[(0, 1)], &mut budget).unwrap();
    assert_eq!(theta.number_of_blocks(), 2);
    assert!(budget.spent() > 0);
}
