//! Claim aggregate
//!
//! A claim is lodged against an active policy with a claimed amount and
//! one or more supporting documents. Adjudication moves it through
//! Submitted -> UnderReview -> Approved or Rejected.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{claim_number, ClaimId, CustomerId, Money, PolicyId};

use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Lodged, awaiting assignment
    Submitted,
    /// Being adjudicated
    UnderReview,
    /// Approved for settlement
    Approved,
    /// Rejected
    Rejected,
}

impl ClaimStatus {
    /// Short status name for diagnostics and persistence
    pub fn name(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::UnderReview => "under_review",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ClaimStatus::Submitted),
            "under_review" => Ok(ClaimStatus::UnderReview),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ClaimError::Validation(format!(
                "unknown claim status: {other}"
            ))),
        }
    }
}

/// Type of loss being claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Death,
    CriticalIllness,
    Hospitalization,
    Accident,
    Maturity,
    Other,
}

impl ClaimType {
    /// Short type name for diagnostics and persistence
    pub fn name(&self) -> &'static str {
        match self {
            ClaimType::Death => "death",
            ClaimType::CriticalIllness => "critical_illness",
            ClaimType::Hospitalization => "hospitalization",
            ClaimType::Accident => "accident",
            ClaimType::Maturity => "maturity",
            ClaimType::Other => "other",
        }
    }
}

impl std::str::FromStr for ClaimType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "death" => Ok(ClaimType::Death),
            "critical_illness" => Ok(ClaimType::CriticalIllness),
            "hospitalization" => Ok(ClaimType::Hospitalization),
            "accident" => Ok(ClaimType::Accident),
            "maturity" => Ok(ClaimType::Maturity),
            "other" => Ok(ClaimType::Other),
            other => Err(ClaimError::Validation(format!(
                "unknown claim type: {other}"
            ))),
        }
    }
}

/// Reference to an uploaded supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDocument {
    /// Original file name as uploaded
    pub file_name: String,
    /// Path of the stored copy, relative to the upload root
    pub stored_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A claim against a policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub claim_number: String,
    pub policy_id: PolicyId,
    pub customer_id: CustomerId,
    pub status: ClaimStatus,
    pub claim_type: ClaimType,
    /// Date the loss occurred
    pub loss_date: NaiveDate,
    pub claimed_amount: Money,
    pub description: String,
    pub documents: Vec<ClaimDocument>,
    /// Adjuster's note recorded at approval or rejection
    pub decision_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Lodges a new claim
    ///
    /// The claimed amount must be positive and within the policy cover;
    /// the caller supplies the cover of the policy being claimed against.
    pub fn submit(
        policy_id: PolicyId,
        customer_id: CustomerId,
        claim_type: ClaimType,
        loss_date: NaiveDate,
        claimed_amount: Money,
        cover: Money,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        if !claimed_amount.is_positive() {
            return Err(ClaimError::NonPositiveAmount(claimed_amount.to_string()));
        }
        if claimed_amount.amount() > cover.amount() {
            return Err(ClaimError::ExceedsCover {
                claimed: claimed_amount.to_string(),
                cover: cover.to_string(),
            });
        }
        if loss_date > now.date_naive() {
            return Err(ClaimError::Validation(
                "loss date cannot be in the future".to_string(),
            ));
        }

        Ok(Self {
            id: ClaimId::new_v7(),
            claim_number: claim_number(),
            policy_id,
            customer_id,
            status: ClaimStatus::Submitted,
            claim_type,
            loss_date,
            claimed_amount,
            description: description.into(),
            documents: Vec::new(),
            decision_note: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches a supporting document reference
    pub fn attach_document(&mut self, document: ClaimDocument) {
        self.updated_at = document.uploaded_at;
        self.documents.push(document);
    }

    /// Moves the claim to a new status
    pub fn update_status(
        &mut self,
        status: ClaimStatus,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        if !self.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.name().to_string(),
                to: status.name().to_string(),
            });
        }
        self.status = status;
        if status.is_terminal() {
            self.decision_note = note;
        }
        self.updated_at = at;
        Ok(())
    }

    /// Checks if a status transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Submitted, UnderReview) | (UnderReview, Approved) | (UnderReview, Rejected)
        )
    }
}
