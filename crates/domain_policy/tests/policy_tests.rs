//! Policy lifecycle tests

use chrono::{Duration, Utc};
use core_kernel::{CustomerId, Money};
use domain_policy::{
    calculate_premium, Catalog, LapseReason, Nominee, Policy, PolicyError, PolicyEvent,
};

fn new_application() -> Policy {
    let catalog = Catalog::standard();
    let scheme = catalog.require("TERM-10").unwrap();
    let cover = Money::rupees(1_500_000);
    let quote = calculate_premium(scheme, 34, cover).unwrap();
    Policy::apply(
        CustomerId::new(),
        scheme.code.clone(),
        cover,
        quote,
        Some(Nominee::new("Ravi Kumar", "father")),
        Utc::now(),
    )
}

#[test]
fn activation_brings_policy_in_force() {
    let mut policy = new_application();
    policy.activate(Utc::now()).unwrap();
    assert!(policy.is_active());
    let events = policy.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], PolicyEvent::PolicyActivated { .. }));
}

#[test]
fn cancellation_inside_window_is_accepted() {
    let mut policy = new_application();
    let activated_at = Utc::now();
    policy.activate(activated_at).unwrap();
    policy
        .cancel(activated_at + Duration::hours(23), "found a better plan")
        .unwrap();
    assert_eq!(policy.state().name(), "cancelled");
}

#[test]
fn cancellation_at_exactly_twenty_four_hours_is_accepted() {
    let mut policy = new_application();
    let activated_at = Utc::now();
    policy.activate(activated_at).unwrap();
    policy
        .cancel(activated_at + Duration::hours(24), "no longer needed")
        .unwrap();
    assert_eq!(policy.state().name(), "cancelled");
}

#[test]
fn late_cancellation_requires_a_penalty() {
    let mut policy = new_application();
    let activated_at = Utc::now();
    policy.activate(activated_at).unwrap();
    let err = policy
        .cancel(activated_at + Duration::hours(25), "no longer needed")
        .unwrap_err();
    assert!(matches!(err, PolicyError::PenaltyRequired { .. }));
    // The refusal leaves the policy untouched.
    assert!(policy.is_active());
}

#[test]
fn cancelled_policy_accepts_no_further_transitions() {
    let mut policy = new_application();
    let now = Utc::now();
    policy.activate(now).unwrap();
    policy.cancel(now + Duration::hours(1), "duplicate purchase").unwrap();

    assert!(policy.activate(now + Duration::hours(2)).is_err());
    assert!(policy
        .lapse(now + Duration::hours(2), LapseReason::NonPayment)
        .is_err());
}

#[test]
fn active_policy_can_lapse_for_non_payment() {
    let mut policy = new_application();
    let now = Utc::now();
    policy.activate(now).unwrap();
    policy
        .lapse(now + Duration::days(90), LapseReason::NonPayment)
        .unwrap();
    assert_eq!(policy.state().name(), "lapsed");
}

#[test]
fn policy_number_has_reference_shape() {
    let policy = new_application();
    assert!(policy.policy_number().starts_with("POL"));
    assert_eq!(policy.policy_number().len(), 21);
}
