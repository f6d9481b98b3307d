use ua_core::{Budget, UaError};

#[test]
fn unlimited_budget_never_fails() {
    let mut budget = Budget::unlimited();
    budget.charge(u64::MAX).unwrap();
    budget.charge(1).unwrap();
    assert_eq!(budget.limit(), None);
}

#[test]
fn limited_budget_reports_spend() {
    let mut budget = Budget::with_limit(2);
    budget.charge(1).unwrap();
    budget.charge(1).unwrap();
    let err = budget.charge(1).unwrap_err();
    match err {
        UaError::ResourceExceeded(info) => {
            assert_eq!(info.code, "budget-exhausted");
            assert_eq!(info.context_value("limit"), Some("2"));
            assert_eq!(info.context_value("spent"), Some("3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn spend_keeps_accumulating_across_charges() {
    let mut budget = Budget::with_limit(10);
    for _ in 0..5 {
        budget.charge(2).unwrap();
    }
    assert_eq!(budget.spent(), 10);
    assert!(budget.charge(1).is_err());
}
