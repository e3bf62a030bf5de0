//! Policy repository implementation
//!
//! Lifecycle state is stored as a status column plus one timestamp column
//! per state so the aggregate can be rebuilt without parsing JSON.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use core_kernel::{Currency, CustomerId, Money, NomineeId, PolicyId};
use domain_policy::{LapseReason, Nominee, Policy, PolicyState};

use crate::error::DatabaseError;

/// Flat row shape of the policies table
#[derive(Debug, sqlx::FromRow)]
struct PolicyRow {
    id: String,
    policy_number: String,
    customer_id: String,
    plan_code: String,
    cover_minor: i64,
    currency: String,
    annual_premium_minor: i64,
    monthly_premium_minor: i64,
    nominee_id: Option<String>,
    nominee_name: Option<String>,
    nominee_relationship: Option<String>,
    status: String,
    applied_at: DateTime<Utc>,
    activated_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
    lapsed_at: Option<DateTime<Utc>>,
    lapse_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn decode_lapse_reason(raw: Option<String>) -> LapseReason {
    match raw.as_deref() {
        Some("non-payment") | None => LapseReason::NonPayment,
        Some(other) => LapseReason::Other(other.to_string()),
    }
}

impl PolicyRow {
    fn into_policy(self) -> Result<Policy, DatabaseError> {
        let id: PolicyId = self.id.parse().map_err(DatabaseError::corrupt)?;
        let customer_id: CustomerId = self.customer_id.parse().map_err(DatabaseError::corrupt)?;
        let currency: Currency = self.currency.parse().map_err(DatabaseError::corrupt)?;

        let state = match self.status.as_str() {
            "applied" => PolicyState::Applied {
                applied_at: self.applied_at,
            },
            "active" => PolicyState::Active {
                activated_at: self
                    .activated_at
                    .ok_or_else(|| DatabaseError::corrupt("active policy missing activated_at"))?,
            },
            "cancelled" => PolicyState::Cancelled {
                cancelled_at: self.cancelled_at.ok_or_else(|| {
                    DatabaseError::corrupt("cancelled policy missing cancelled_at")
                })?,
                reason: self.cancel_reason.unwrap_or_default(),
            },
            "lapsed" => PolicyState::Lapsed {
                lapsed_at: self
                    .lapsed_at
                    .ok_or_else(|| DatabaseError::corrupt("lapsed policy missing lapsed_at"))?,
                reason: decode_lapse_reason(self.lapse_reason),
            },
            other => {
                return Err(DatabaseError::corrupt(format!(
                    "unknown policy status: {other}"
                )))
            }
        };

        let nominee = match (self.nominee_id, self.nominee_name, self.nominee_relationship) {
            (Some(id), Some(name), Some(relationship)) => Some(Nominee {
                id: id.parse::<NomineeId>().map_err(DatabaseError::corrupt)?,
                name,
                relationship,
            }),
            _ => None,
        };

        Ok(Policy::from_parts(
            id,
            self.policy_number,
            customer_id,
            self.plan_code,
            Money::from_minor(self.cover_minor, currency),
            Money::from_minor(self.annual_premium_minor, currency),
            Money::from_minor(self.monthly_premium_minor, currency),
            nominee,
            state,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// State columns derived from the aggregate for writes
struct StateColumns {
    status: &'static str,
    applied_at: DateTime<Utc>,
    activated_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
    lapsed_at: Option<DateTime<Utc>>,
    lapse_reason: Option<String>,
}

fn encode_state(policy: &Policy) -> StateColumns {
    let mut columns = StateColumns {
        status: policy.state().name(),
        applied_at: policy.created_at(),
        activated_at: None,
        cancelled_at: None,
        cancel_reason: None,
        lapsed_at: None,
        lapse_reason: None,
    };
    match policy.state() {
        PolicyState::Applied { applied_at } => columns.applied_at = *applied_at,
        PolicyState::Active { activated_at } => columns.activated_at = Some(*activated_at),
        PolicyState::Cancelled {
            cancelled_at,
            reason,
        } => {
            columns.cancelled_at = Some(*cancelled_at);
            columns.cancel_reason = Some(reason.clone());
        }
        PolicyState::Lapsed { lapsed_at, reason } => {
            columns.lapsed_at = Some(*lapsed_at);
            columns.lapse_reason = Some(reason.to_string());
        }
    }
    columns
}

/// Repository for the policy aggregate
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: SqlitePool,
}

impl PolicyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, policy: &Policy) -> Result<(), DatabaseError> {
        let state = encode_state(policy);
        sqlx::query(
            r#"
            INSERT INTO policies (
                id, policy_number, customer_id, plan_code,
                cover_minor, currency, annual_premium_minor, monthly_premium_minor,
                nominee_id, nominee_name, nominee_relationship,
                status, applied_at, activated_at, cancelled_at, cancel_reason,
                lapsed_at, lapse_reason, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(policy.id().to_string())
        .bind(policy.policy_number())
        .bind(policy.customer_id().to_string())
        .bind(policy.plan_code())
        .bind(policy.cover().to_minor())
        .bind(policy.cover().currency().code())
        .bind(policy.annual_premium().to_minor())
        .bind(policy.monthly_premium().to_minor())
        .bind(policy.nominee().map(|n| n.id.to_string()))
        .bind(policy.nominee().map(|n| n.name.clone()))
        .bind(policy.nominee().map(|n| n.relationship.clone()))
        .bind(state.status)
        .bind(state.applied_at)
        .bind(state.activated_at)
        .bind(state.cancelled_at)
        .bind(state.cancel_reason)
        .bind(state.lapsed_at)
        .bind(state.lapse_reason)
        .bind(policy.created_at())
        .bind(policy.updated_at())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persists a lifecycle transition
    pub async fn update_state(&self, policy: &Policy) -> Result<(), DatabaseError> {
        let state = encode_state(policy);
        let result = sqlx::query(
            r#"
            UPDATE policies
            SET status = ?, activated_at = ?, cancelled_at = ?, cancel_reason = ?,
                lapsed_at = ?, lapse_reason = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(state.status)
        .bind(state.activated_at)
        .bind(state.cancelled_at)
        .bind(state.cancel_reason)
        .bind(state.lapsed_at)
        .bind(state.lapse_reason)
        .bind(policy.updated_at())
        .bind(policy.id().to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Policy", policy.id()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: PolicyId) -> Result<Option<Policy>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>("SELECT * FROM policies WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(PolicyRow::into_policy).transpose()
    }

    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Policy>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            "SELECT * FROM policies WHERE customer_id = ? ORDER BY created_at DESC",
        )
        .bind(customer_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(PolicyRow::into_policy).collect()
    }
}
