//! Registration and login handlers
//!
//! Registration runs the simulated biometric checks before the profile
//! is persisted. Login verifies password and digital token together and
//! only then issues a JWT.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use core_kernel::DigitalToken;
use domain_customer::{
    hash_password, verify_password, Customer, Gender, Pan, RegistrationDetails,
};
use infra_db::CustomerRepository;

use crate::auth::{create_token, ROLE_ADJUSTER, ROLE_CUSTOMER};
use crate::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::ApiError;
use crate::AppState;

/// Registers a new customer
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let pan: Pan = request.pan.parse().map_err(ApiError::from)?;
    let gender: Gender = request.gender.parse().map_err(ApiError::from)?;
    let password_hash = hash_password(&request.password)?;

    let details = RegistrationDetails {
        username: request.username,
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        date_of_birth: request.date_of_birth,
        gender,
        address: request.address,
        pan,
    };
    let mut customer = Customer::register(details, password_hash)?;

    let face_capture = request.face_capture.unwrap_or_default();
    let retina_capture = request.retina_capture.unwrap_or_default();
    let face = state
        .verifier
        .verify_face(face_capture.as_bytes())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let retina = state
        .verifier
        .verify_retina(retina_capture.as_bytes())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    customer.apply_face_verification(&face);
    customer.apply_retina_verification(&retina);

    let repo = CustomerRepository::new(state.pool.clone());
    repo.insert(&customer).await?;

    info!(customer_id = %customer.id(), "customer registered");

    let response = RegisterResponse {
        customer: (&customer).into(),
        digital_token: customer.digital_token().as_str().to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticates a customer and issues a JWT
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let repo = CustomerRepository::new(state.pool.clone());
    let mut customer = repo
        .find_by_username(&request.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&request.password, customer.password_hash()) {
        return Err(ApiError::Unauthorized);
    }

    let token: DigitalToken = request
        .digital_token
        .parse()
        .map_err(|_| ApiError::Unauthorized)?;
    customer.verify_token(&token)?;

    customer.record_login(Utc::now());
    repo.update(&customer).await?;

    let mut roles = vec![ROLE_CUSTOMER.to_string()];
    if state.config.is_adjuster(customer.username()) {
        roles.push(ROLE_ADJUSTER.to_string());
    }

    let access_token = create_token(
        &customer.id().to_string(),
        customer.username(),
        roles,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(customer_id = %customer.id(), "customer logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_expiration_secs,
    }))
}
