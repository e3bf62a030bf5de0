//! Claim repository implementation
//!
//! Document references are stored as a JSON array in the row; everything
//! else is flat columns.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use core_kernel::{ClaimId, Currency, CustomerId, Money, PolicyId};
use domain_claims::{Claim, ClaimDocument, ClaimStatus, ClaimType};

use crate::error::DatabaseError;

/// Flat row shape of the claims table
#[derive(Debug, sqlx::FromRow)]
struct ClaimRow {
    id: String,
    claim_number: String,
    policy_id: String,
    customer_id: String,
    status: String,
    claim_type: String,
    loss_date: NaiveDate,
    claimed_amount_minor: i64,
    currency: String,
    description: String,
    documents: String,
    decision_note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClaimRow {
    fn into_claim(self) -> Result<Claim, DatabaseError> {
        let currency: Currency = self.currency.parse().map_err(DatabaseError::corrupt)?;
        let documents: Vec<ClaimDocument> =
            serde_json::from_str(&self.documents).map_err(DatabaseError::corrupt)?;
        let claim_type: ClaimType = self.claim_type.parse().map_err(DatabaseError::corrupt)?;

        Ok(Claim {
            id: self.id.parse::<ClaimId>().map_err(DatabaseError::corrupt)?,
            claim_number: self.claim_number,
            policy_id: self
                .policy_id
                .parse::<PolicyId>()
                .map_err(DatabaseError::corrupt)?,
            customer_id: self
                .customer_id
                .parse::<CustomerId>()
                .map_err(DatabaseError::corrupt)?,
            status: self
                .status
                .parse::<ClaimStatus>()
                .map_err(DatabaseError::corrupt)?,
            claim_type,
            loss_date: self.loss_date,
            claimed_amount: Money::from_minor(self.claimed_amount_minor, currency),
            description: self.description,
            documents,
            decision_note: self.decision_note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for the claim aggregate
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: SqlitePool,
}

impl ClaimRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let documents = serde_json::to_string(&claim.documents).map_err(DatabaseError::corrupt)?;
        sqlx::query(
            r#"
            INSERT INTO claims (
                id, claim_number, policy_id, customer_id, status, claim_type,
                loss_date, claimed_amount_minor, currency, description,
                documents, decision_note, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(claim.id.to_string())
        .bind(&claim.claim_number)
        .bind(claim.policy_id.to_string())
        .bind(claim.customer_id.to_string())
        .bind(claim.status.name())
        .bind(claim.claim_type.name())
        .bind(claim.loss_date)
        .bind(claim.claimed_amount.to_minor())
        .bind(claim.claimed_amount.currency().code())
        .bind(&claim.description)
        .bind(documents)
        .bind(&claim.decision_note)
        .bind(claim.created_at)
        .bind(claim.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persists status, documents, and the decision note
    pub async fn update(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let documents = serde_json::to_string(&claim.documents).map_err(DatabaseError::corrupt)?;
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET status = ?, documents = ?, decision_note = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(claim.status.name())
        .bind(documents)
        .bind(&claim.decision_note)
        .bind(claim.updated_at)
        .bind(claim.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim.id));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>("SELECT * FROM claims WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(ClaimRow::into_claim).transpose()
    }

    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Claim>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            "SELECT * FROM claims WHERE customer_id = ? ORDER BY created_at DESC",
        )
        .bind(customer_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ClaimRow::into_claim).collect()
    }

    pub async fn find_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            "SELECT * FROM claims WHERE status = ? ORDER BY created_at ASC",
        )
        .bind(status.name())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ClaimRow::into_claim).collect()
    }
}
