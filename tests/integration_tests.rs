//! Integration tests for the SecureBank insurance platform
//!
//! These tests verify cross-domain workflows that involve multiple
//! crates working together, without touching the HTTP layer.

use chrono::{Duration, NaiveDate, Utc};
use core_kernel::Money;
use rust_decimal_macros::dec;

mod registration_to_policy_workflow {
    use super::*;
    use domain_customer::{Customer, Gender, RegistrationDetails};
    use domain_policy::{calculate_premium, Catalog, Nominee, Policy, PolicyState};

    fn registered_customer() -> Customer {
        let details = RegistrationDetails {
            username: "asha.verma".to_string(),
            full_name: "Asha Verma".to_string(),
            email: "asha.verma@example.com".to_string(),
            phone: "9876543210".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1996, 4, 12).unwrap(),
            gender: Gender::Female,
            address: "14 MG Road, Pune".to_string(),
            pan: "ABCDE1234F".parse().unwrap(),
        };
        Customer::register(details, "hashed-password".to_string()).unwrap()
    }

    /// A registered customer can be quoted and brought on risk
    #[test]
    fn test_register_quote_and_purchase() {
        let customer = registered_customer();
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();

        let cover = Money::rupees(500_000);
        let quote = calculate_premium(scheme, customer.age(), cover).unwrap();

        let now = Utc::now();
        let mut policy = Policy::apply(
            customer.id(),
            scheme.code.clone(),
            cover,
            quote,
            Some(Nominee::new("Ravi Verma", "spouse")),
            now,
        );
        policy.activate(now).unwrap();

        assert!(policy.is_active());
        assert_eq!(policy.customer_id(), customer.id());
        assert_eq!(policy.cover().amount(), dec!(500000));
    }

    /// Cancellation inside the grace window leaves no penalty behind
    #[test]
    fn test_cancel_within_grace_window() {
        let customer = registered_customer();
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let cover = Money::rupees(500_000);
        let quote = calculate_premium(scheme, customer.age(), cover).unwrap();

        let activated_at = Utc::now();
        let mut policy = Policy::apply(
            customer.id(),
            scheme.code.clone(),
            cover,
            quote,
            None,
            activated_at,
        );
        policy.activate(activated_at).unwrap();

        policy
            .cancel(activated_at + Duration::hours(12), "changed my mind")
            .unwrap();
        assert!(matches!(policy.state(), PolicyState::Cancelled { .. }));
    }
}

mod policy_to_claim_workflow {
    use super::*;
    use core_kernel::CustomerId;
    use domain_claims::{Claim, ClaimDocument, ClaimStatus, ClaimType};
    use domain_policy::{calculate_premium, Catalog, Policy};

    fn active_policy() -> Policy {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let cover = Money::rupees(1_000_000);
        let quote = calculate_premium(scheme, 35, cover).unwrap();
        let now = Utc::now();
        let mut policy = Policy::apply(
            CustomerId::new(),
            scheme.code.clone(),
            cover,
            quote,
            None,
            now,
        );
        policy.activate(now).unwrap();
        policy
    }

    /// A claim lodged against an active policy moves through review to
    /// approval
    #[test]
    fn test_claim_lodged_and_approved() {
        let policy = active_policy();
        let now = Utc::now();

        let mut claim = Claim::submit(
            policy.id(),
            policy.customer_id(),
            ClaimType::Hospitalization,
            now.date_naive(),
            Money::rupees(80_000),
            policy.cover(),
            "Three-day hospital admission".to_string(),
            now,
        )
        .unwrap();
        claim.attach_document(ClaimDocument {
            file_name: "discharge-summary.pdf".to_string(),
            stored_path: "claim_documents/discharge-summary.pdf".to_string(),
            uploaded_at: now,
        });

        claim
            .update_status(ClaimStatus::UnderReview, None, now)
            .unwrap();
        claim
            .update_status(
                ClaimStatus::Approved,
                Some("documents verified".to_string()),
                now,
            )
            .unwrap();

        assert!(claim.status.is_terminal());
        assert_eq!(claim.decision_note.as_deref(), Some("documents verified"));
    }

    /// Claimed amount is capped by the policy cover
    #[test]
    fn test_claim_cannot_exceed_cover() {
        let policy = active_policy();
        let now = Utc::now();

        let result = Claim::submit(
            policy.id(),
            policy.customer_id(),
            ClaimType::Accident,
            now.date_naive(),
            Money::rupees(2_000_000),
            policy.cover(),
            "Total loss".to_string(),
            now,
        );
        assert!(result.is_err());
    }
}

mod premium_consistency {
    use super::*;
    use domain_policy::{calculate_premium, Catalog};

    /// The published rate card fixture: a thirty-year-old buying five
    /// lakh of term cover
    #[test]
    fn test_published_rate_fixture() {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let quote = calculate_premium(scheme, 30, Money::rupees(500_000)).unwrap();

        assert_eq!(quote.annual.amount(), dec!(700));
        assert_eq!(quote.monthly.amount(), dec!(58));
    }

    /// Larger covers earn the volume tier discount
    #[test]
    fn test_volume_tiers_reduce_the_rate() {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();

        let small = calculate_premium(scheme, 30, Money::rupees(500_000)).unwrap();
        let large = calculate_premium(scheme, 30, Money::rupees(5_000_000)).unwrap();

        // Ten times the cover costs less than ten times the premium
        let scaled = small.annual.amount() * dec!(10);
        assert!(large.annual.amount() < scaled);
    }
}

mod support_workflow {
    use super::*;
    use core_kernel::CustomerId;
    use domain_support::{ReportCategory, ReportStatus, SupportReport};

    /// A dispute report is filed, worked, and resolved
    #[test]
    fn test_report_filed_and_resolved() {
        let now = Utc::now();
        let mut report = SupportReport::file(
            CustomerId::new(),
            ReportCategory::UnauthorizedTransaction,
            "Premium debited twice".to_string(),
            "Two debits of the same premium on the same day".to_string(),
            now,
        )
        .unwrap();

        assert_eq!(report.status, ReportStatus::Submitted);
        report.start_progress(now).unwrap();
        report.resolve("duplicate debit reversed", now).unwrap();

        assert_eq!(report.status, ReportStatus::Resolved);
        assert_eq!(
            report.resolution_note.as_deref(),
            Some("duplicate debit reversed")
        );
    }
}
