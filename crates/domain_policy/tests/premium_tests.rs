//! Premium calculator tests

use core_kernel::Money;
use domain_policy::{calculate_premium, Catalog, PolicyError};
use proptest::prelude::*;

#[test]
fn term_ten_quote_is_pinned() {
    let catalog = Catalog::standard();
    let scheme = catalog.require("TERM-10").unwrap();
    let quote = calculate_premium(scheme, 30, Money::rupees(500_000)).unwrap();
    // 1.4 per mille * 500 thousand, no volume discount below 10 lakh
    assert_eq!(quote.annual, Money::rupees(700));
    assert_eq!(quote.monthly, Money::rupees(58));
}

#[test]
fn quotes_are_whole_rupees() {
    let catalog = Catalog::standard();
    for scheme in catalog.schemes() {
        let quote = calculate_premium(scheme, scheme.min_entry_age, scheme.min_cover).unwrap();
        assert_eq!(quote.annual, quote.annual.round_bankers(0), "{}", scheme.code);
        assert_eq!(quote.monthly, quote.monthly.round_bankers(0), "{}", scheme.code);
    }
}

#[test]
fn unknown_plan_code_is_rejected() {
    let catalog = Catalog::standard();
    let err = catalog.require("TERM-99").unwrap_err();
    assert!(matches!(err, PolicyError::UnknownPlan(_)));
}

proptest! {
    // Older entrants never pay less than younger ones for the same cover.
    #[test]
    fn premium_is_monotone_in_age(young in 18u8..=40, delta in 0u8..=25, cover in 500_000i64..=9_000_000) {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let old = young + delta;
        prop_assume!(old <= scheme.max_entry_age);
        let cover = Money::rupees(cover);
        let quote_young = calculate_premium(scheme, young, cover).unwrap();
        let quote_old = calculate_premium(scheme, old, cover).unwrap();
        prop_assert!(quote_old.annual.amount() >= quote_young.annual.amount());
    }

    // Twelve monthly payments land within a rupee of the annual figure
    // times twelve (rounding only).
    #[test]
    fn monthly_tracks_annual(age in 18u8..=65, cover in 500_000i64..=10_000_000) {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let quote = calculate_premium(scheme, age, Money::rupees(cover)).unwrap();
        let twelve_monthly = quote.monthly.multiply(rust_decimal::Decimal::from(12));
        let diff = (twelve_monthly.amount() - quote.annual.amount()).abs();
        prop_assert!(diff <= rust_decimal::Decimal::from(6));
    }
}
