//! Claims handlers
//!
//! Intake is a multipart request so supporting documents travel with the
//! claim itself. Adjudication is restricted to the adjuster role.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use core_kernel::{ClaimId, Money, PolicyId};
use domain_claims::{Claim, ClaimDocument, ClaimError, ClaimStatus, ClaimType};
use infra_db::{ClaimRepository, PolicyRepository};

use crate::auth::{has_role, Claims, ROLE_ADJUSTER};
use crate::dto::claims::{ClaimResponse, UpdateClaimStatusRequest};
use crate::error::ApiError;
use crate::handlers::current_customer_id;
use crate::uploads::{self, CLAIM_DOCUMENTS};
use crate::AppState;

/// Fields collected from the multipart intake form
#[derive(Default)]
struct ClaimForm {
    policy_id: Option<String>,
    claim_type: Option<String>,
    loss_date: Option<String>,
    amount: Option<String>,
    description: Option<String>,
    documents: Vec<(String, Vec<u8>)>,
}

impl ClaimForm {
    async fn parse(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ClaimForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "policy_id" => form.policy_id = Some(read_text(field).await?),
                "claim_type" => form.claim_type = Some(read_text(field).await?),
                "loss_date" => form.loss_date = Some(read_text(field).await?),
                "amount" => form.amount = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "document" => {
                    let file_name = field
                        .file_name()
                        .unwrap_or("document")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        ApiError::BadRequest(format!("failed to read upload: {e}"))
                    })?;
                    form.documents.push((file_name, bytes.to_vec()));
                }
                other => {
                    return Err(ApiError::BadRequest(format!(
                        "unexpected form field: {other}"
                    )))
                }
            }
        }
        Ok(form)
    }

    fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
        value.ok_or_else(|| ApiError::BadRequest(format!("missing form field: {field}")))
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read field: {e}")))
}

/// Lodges a claim with its supporting documents
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let customer_id = current_customer_id(&claims)?;
    let form = ClaimForm::parse(multipart).await?;

    let policy_id: PolicyId = ClaimForm::require(form.policy_id, "policy_id")?
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid policy id".to_string()))?;
    let claim_type: ClaimType = ClaimForm::require(form.claim_type, "claim_type")?
        .parse()
        .map_err(ApiError::from)?;
    let loss_date: NaiveDate = ClaimForm::require(form.loss_date, "loss_date")?
        .parse()
        .map_err(|_| ApiError::BadRequest("loss_date must be YYYY-MM-DD".to_string()))?;
    let amount: i64 = ClaimForm::require(form.amount, "amount")?
        .parse()
        .map_err(|_| ApiError::BadRequest("amount must be whole rupees".to_string()))?;
    let description = ClaimForm::require(form.description, "description")?;

    if form.documents.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one supporting document is required".to_string(),
        ));
    }

    let policy = PolicyRepository::new(state.pool.clone())
        .find_by_id(policy_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Policy {policy_id}")))?;
    if policy.customer_id() != customer_id {
        return Err(ApiError::NotFound(format!("Policy {policy_id}")));
    }
    if !policy.is_active() {
        return Err(ClaimError::PolicyNotActive.into());
    }

    let now = Utc::now();
    let mut claim = Claim::submit(
        policy_id,
        customer_id,
        claim_type,
        loss_date,
        Money::rupees(amount),
        policy.cover(),
        description,
        now,
    )?;

    for (file_name, bytes) in &form.documents {
        let stored_path =
            uploads::store(&state.config.upload_dir, CLAIM_DOCUMENTS, file_name, bytes).await?;
        claim.attach_document(ClaimDocument {
            file_name: file_name.clone(),
            stored_path,
            uploaded_at: now,
        });
    }

    ClaimRepository::new(state.pool.clone()).insert(&claim).await?;

    info!(claim_id = %claim.id, policy_id = %policy_id, "claim lodged");

    Ok((StatusCode::CREATED, Json((&claim).into())))
}

#[derive(Debug, Deserialize)]
pub struct ClaimListParams {
    /// Adjusters may filter the cross-customer queue by status
    pub status: Option<String>,
}

/// Lists claims
///
/// Customers see their own claims; adjusters can pull the review queue
/// with `?status=`.
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ClaimListParams>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let repo = ClaimRepository::new(state.pool.clone());

    let results = match params.status {
        Some(status) if has_role(&claims, ROLE_ADJUSTER) => {
            let status: ClaimStatus = status.parse().map_err(ApiError::from)?;
            repo.find_by_status(status).await?
        }
        Some(_) => return Err(ApiError::Forbidden("adjuster role required".to_string())),
        None => repo.find_by_customer(current_customer_id(&claims)?).await?,
    };

    Ok(Json(results.iter().map(Into::into).collect()))
}

/// Gets a single claim
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id: ClaimId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid claim id: {id}")))?;
    let claim = ClaimRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Claim {id}")))?;

    let customer_id = current_customer_id(&claims)?;
    if claim.customer_id != customer_id && !has_role(&claims, ROLE_ADJUSTER) {
        return Err(ApiError::NotFound(format!("Claim {id}")));
    }
    Ok(Json((&claim).into()))
}

/// Moves a claim through adjudication (adjuster only)
pub async fn update_claim_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(request): Json<UpdateClaimStatusRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    if !has_role(&claims, ROLE_ADJUSTER) {
        return Err(ApiError::Forbidden("adjuster role required".to_string()));
    }

    let id: ClaimId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid claim id: {id}")))?;
    let repo = ClaimRepository::new(state.pool.clone());
    let mut claim = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Claim {id}")))?;

    let status: ClaimStatus = request.status.parse().map_err(ApiError::from)?;
    claim.update_status(status, request.note, Utc::now())?;
    repo.update(&claim).await?;

    info!(claim_id = %claim.id, status = status.name(), "claim status updated");

    Ok(Json((&claim).into()))
}
