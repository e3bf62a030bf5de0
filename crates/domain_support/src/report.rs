//! Support report aggregate
//!
//! Reports move Submitted -> InProgress -> Resolved. A resolution note is
//! recorded when the report is closed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, ReportId};

use crate::error::SupportError;

/// What the customer is reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    /// A transaction the customer did not authorize
    UnauthorizedTransaction,
    /// A service complaint
    Complaint,
    /// General feedback
    Feedback,
}

impl ReportCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ReportCategory::UnauthorizedTransaction => "unauthorized_transaction",
            ReportCategory::Complaint => "complaint",
            ReportCategory::Feedback => "feedback",
        }
    }
}

impl std::str::FromStr for ReportCategory {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unauthorized_transaction" => Ok(ReportCategory::UnauthorizedTransaction),
            "complaint" => Ok(ReportCategory::Complaint),
            "feedback" => Ok(ReportCategory::Feedback),
            other => Err(SupportError::Validation(format!(
                "unknown report category: {other}"
            ))),
        }
    }
}

/// Resolution workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ReportStatus::Submitted),
            "in_progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(SupportError::Validation(format!(
                "unknown report status: {other}"
            ))),
        }
    }
}

/// A customer service report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportReport {
    pub id: ReportId,
    pub customer_id: CustomerId,
    pub category: ReportCategory,
    pub subject: String,
    pub description: String,
    pub status: ReportStatus,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupportReport {
    /// Files a new report
    pub fn file(
        customer_id: CustomerId,
        category: ReportCategory,
        subject: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, SupportError> {
        let subject = subject.into();
        let description = description.into();
        if subject.trim().is_empty() {
            return Err(SupportError::Validation("subject is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(SupportError::Validation(
                "description is required".to_string(),
            ));
        }
        Ok(Self {
            id: ReportId::new_v7(),
            customer_id,
            category,
            subject,
            description,
            status: ReportStatus::Submitted,
            resolution_note: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Picks the report up for handling
    pub fn start_progress(&mut self, at: DateTime<Utc>) -> Result<(), SupportError> {
        self.transition(ReportStatus::InProgress, at)
    }

    /// Closes the report with a resolution note
    pub fn resolve(&mut self, note: impl Into<String>, at: DateTime<Utc>) -> Result<(), SupportError> {
        self.transition(ReportStatus::Resolved, at)?;
        self.resolution_note = Some(note.into());
        Ok(())
    }

    fn transition(&mut self, target: ReportStatus, at: DateTime<Utc>) -> Result<(), SupportError> {
        use ReportStatus::*;
        let allowed = matches!(
            (self.status, target),
            (Submitted, InProgress) | (InProgress, Resolved)
        );
        if !allowed {
            return Err(SupportError::InvalidStatusTransition {
                from: self.status.name().to_string(),
                to: target.name().to_string(),
            });
        }
        self.status = target;
        self.updated_at = at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filed_report() -> SupportReport {
        SupportReport::file(
            CustomerId::new(),
            ReportCategory::UnauthorizedTransaction,
            "Unknown debit on my account",
            "A debit of 4,500 on 2025-01-08 that I did not make",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_report_starts_submitted() {
        let report = filed_report();
        assert_eq!(report.status, ReportStatus::Submitted);
        assert!(report.resolution_note.is_none());
    }

    #[test]
    fn test_resolution_requires_progress_first() {
        let mut report = filed_report();
        assert!(report.resolve("done", Utc::now()).is_err());

        report.start_progress(Utc::now()).unwrap();
        report.resolve("transaction reversed", Utc::now()).unwrap();
        assert_eq!(report.status, ReportStatus::Resolved);
        assert_eq!(report.resolution_note.as_deref(), Some("transaction reversed"));
    }

    #[test]
    fn test_blank_subject_is_rejected() {
        let err = SupportReport::file(
            CustomerId::new(),
            ReportCategory::Feedback,
            "   ",
            "some text",
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, SupportError::Validation(_)));
    }
}
