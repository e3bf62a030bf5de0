//! Customer service DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_support::SupportReport;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    /// "unauthorized_transaction", "complaint", or "feedback"
    pub category: String,
    #[validate(length(min = 1, max = 128))]
    pub subject: String,
    #[validate(length(min = 1, max = 2048))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReportStatusRequest {
    /// Target status: "in_progress" or "resolved"
    pub status: String,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub category: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SupportReport> for ReportResponse {
    fn from(report: &SupportReport) -> Self {
        Self {
            id: report.id.to_string(),
            category: report.category.name().to_string(),
            subject: report.subject.clone(),
            description: report.description.clone(),
            status: report.status.name().to_string(),
            resolution_note: report.resolution_note.clone(),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}
