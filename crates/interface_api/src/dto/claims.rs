//! Claims DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::{Claim, ClaimDocument};

#[derive(Debug, Serialize)]
pub struct ClaimDocumentResponse {
    pub file_name: String,
    pub stored_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&ClaimDocument> for ClaimDocumentResponse {
    fn from(document: &ClaimDocument) -> Self {
        Self {
            file_name: document.file_name.clone(),
            stored_path: document.stored_path.clone(),
            uploaded_at: document.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: String,
    pub claim_number: String,
    pub policy_id: String,
    pub status: String,
    pub claim_type: String,
    pub loss_date: NaiveDate,
    pub claimed_amount: Decimal,
    pub currency: String,
    pub description: String,
    pub documents: Vec<ClaimDocumentResponse>,
    pub decision_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            claim_number: claim.claim_number.clone(),
            policy_id: claim.policy_id.to_string(),
            status: claim.status.name().to_string(),
            claim_type: claim.claim_type.name().to_string(),
            loss_date: claim.loss_date,
            claimed_amount: claim.claimed_amount.amount(),
            currency: claim.claimed_amount.currency().code().to_string(),
            description: claim.description.clone(),
            documents: claim.documents.iter().map(Into::into).collect(),
            decision_note: claim.decision_note.clone(),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateClaimStatusRequest {
    /// Target status: "under_review", "approved", or "rejected"
    pub status: String,
    pub note: Option<String>,
}
