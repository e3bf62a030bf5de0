//! Support report repository implementation

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use core_kernel::{CustomerId, ReportId};
use domain_support::{ReportCategory, ReportStatus, SupportReport};

use crate::error::DatabaseError;

/// Flat row shape of the reports table
#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: String,
    customer_id: String,
    category: String,
    subject: String,
    description: String,
    status: String,
    resolution_note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> Result<SupportReport, DatabaseError> {
        Ok(SupportReport {
            id: self.id.parse::<ReportId>().map_err(DatabaseError::corrupt)?,
            customer_id: self
                .customer_id
                .parse::<CustomerId>()
                .map_err(DatabaseError::corrupt)?,
            category: self
                .category
                .parse::<ReportCategory>()
                .map_err(DatabaseError::corrupt)?,
            subject: self.subject,
            description: self.description,
            status: self
                .status
                .parse::<ReportStatus>()
                .map_err(DatabaseError::corrupt)?,
            resolution_note: self.resolution_note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for customer service reports
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, report: &SupportReport) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, customer_id, category, subject, description,
                status, resolution_note, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(report.id.to_string())
        .bind(report.customer_id.to_string())
        .bind(report.category.name())
        .bind(&report.subject)
        .bind(&report.description)
        .bind(report.status.name())
        .bind(&report.resolution_note)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, report: &SupportReport) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET status = ?, resolution_note = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(report.status.name())
        .bind(&report.resolution_note)
        .bind(report.updated_at)
        .bind(report.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Report", report.id));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: ReportId) -> Result<Option<SupportReport>, DatabaseError> {
        let row = sqlx::query_as::<_, ReportRow>("SELECT * FROM reports WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(ReportRow::into_report).transpose()
    }

    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<SupportReport>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            "SELECT * FROM reports WHERE customer_id = ? ORDER BY created_at DESC",
        )
        .bind(customer_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ReportRow::into_report).collect()
    }
}
