//! Policy handlers
//!
//! Purchase is self-service: underwriting is simulated, so an accepted
//! application is brought into force immediately. The no-fee
//! cancellation window runs from that activation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use core_kernel::{Money, PolicyId};
use domain_policy::{calculate_premium, Nominee, Policy};
use infra_db::{CustomerRepository, PolicyRepository};

use crate::auth::Claims;
use crate::dto::policy::{CancelPolicyRequest, CreatePolicyRequest, PolicyResponse};
use crate::error::ApiError;
use crate::handlers::current_customer_id;
use crate::AppState;

/// Purchases a policy for the authenticated customer
pub async fn create_policy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    request.validate()?;
    let customer_id = current_customer_id(&claims)?;

    let customers = CustomerRepository::new(state.pool.clone());
    let customer = customers
        .find_by_id(customer_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let scheme = state.catalog.require(&request.plan_code)?;
    let cover = Money::rupees(request.cover);
    let quote = calculate_premium(scheme, customer.age(), cover)?;

    let nominee = request
        .nominee
        .map(|n| Nominee::new(n.name, n.relationship));

    let now = Utc::now();
    let mut policy = Policy::apply(
        customer_id,
        scheme.code.clone(),
        cover,
        quote,
        nominee,
        now,
    );
    policy.activate(now)?;

    let policies = PolicyRepository::new(state.pool.clone());
    policies.insert(&policy).await?;

    info!(policy_id = %policy.id(), customer_id = %customer_id, "policy purchased");

    Ok((StatusCode::CREATED, Json((&policy).into())))
}

/// Lists the authenticated customer's policies
pub async fn list_policies(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let customer_id = current_customer_id(&claims)?;
    let policies = PolicyRepository::new(state.pool.clone())
        .find_by_customer(customer_id)
        .await?;
    Ok(Json(policies.iter().map(Into::into).collect()))
}

/// Gets one of the customer's policies
pub async fn get_policy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = load_owned_policy(&state, &claims, parse_policy_id(&id)?).await?;
    Ok(Json((&policy).into()))
}

/// Cancels a policy
///
/// Inside the 24-hour window after activation the cancellation is free;
/// afterwards the request is refused with a conflict.
pub async fn cancel_policy(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(request): Json<CancelPolicyRequest>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let mut policy = load_owned_policy(&state, &claims, parse_policy_id(&id)?).await?;

    let reason = request
        .reason
        .unwrap_or_else(|| "customer request".to_string());
    policy.cancel(Utc::now(), reason)?;

    PolicyRepository::new(state.pool.clone())
        .update_state(&policy)
        .await?;

    info!(policy_id = %policy.id(), "policy cancelled");

    Ok(Json((&policy).into()))
}

fn parse_policy_id(raw: &str) -> Result<PolicyId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid policy id: {raw}")))
}

/// Loads a policy and enforces ownership
///
/// Other customers' policies are reported as missing rather than
/// forbidden so identifiers cannot be probed.
async fn load_owned_policy(
    state: &AppState,
    claims: &Claims,
    id: PolicyId,
) -> Result<Policy, ApiError> {
    let customer_id = current_customer_id(claims)?;
    let policy = PolicyRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Policy {id}")))?;
    if policy.customer_id() != customer_id {
        return Err(ApiError::NotFound(format!("Policy {id}")));
    }
    Ok(policy)
}
