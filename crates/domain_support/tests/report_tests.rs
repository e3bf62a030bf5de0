//! Support report workflow tests

use chrono::Utc;
use core_kernel::CustomerId;
use domain_support::{ReportCategory, ReportStatus, SupportError, SupportReport};

#[test]
fn report_walks_the_full_workflow() {
    let mut report = SupportReport::file(
        CustomerId::new(),
        ReportCategory::Complaint,
        "Premium receipt not issued",
        "Paid on the 3rd, no receipt after a week",
        Utc::now(),
    )
    .unwrap();

    report.start_progress(Utc::now()).unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);

    report.resolve("receipt re-issued by email", Utc::now()).unwrap();
    assert_eq!(report.status, ReportStatus::Resolved);
}

#[test]
fn resolved_report_cannot_be_reopened() {
    let mut report = SupportReport::file(
        CustomerId::new(),
        ReportCategory::Feedback,
        "Great claim turnaround",
        "Settled in four days",
        Utc::now(),
    )
    .unwrap();
    report.start_progress(Utc::now()).unwrap();
    report.resolve("acknowledged", Utc::now()).unwrap();

    let err = report.start_progress(Utc::now()).unwrap_err();
    assert!(matches!(err, SupportError::InvalidStatusTransition { .. }));
}

#[test]
fn category_round_trips_through_persistence_name() {
    for category in [
        ReportCategory::UnauthorizedTransaction,
        ReportCategory::Complaint,
        ReportCategory::Feedback,
    ] {
        let parsed: ReportCategory = category.name().parse().unwrap();
        assert_eq!(parsed, category);
    }
}
