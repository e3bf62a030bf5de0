//! Customer profile handlers

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use tracing::info;

use infra_db::CustomerRepository;

use crate::auth::Claims;
use crate::dto::customer::CustomerResponse;
use crate::error::ApiError;
use crate::handlers::current_customer_id;
use crate::uploads::{self, PROFILE_PHOTOS};
use crate::AppState;

/// Returns the authenticated customer's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer_id = current_customer_id(&claims)?;
    let customer = CustomerRepository::new(state.pool.clone())
        .find_by_id(customer_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json((&customer).into()))
}

/// Uploads or replaces the profile photo
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer_id = current_customer_id(&claims)?;
    let repo = CustomerRepository::new(state.pool.clone());
    let mut customer = repo
        .find_by_id(customer_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
        .ok_or_else(|| ApiError::BadRequest("photo file is required".to_string()))?;

    let file_name = field.file_name().unwrap_or("photo").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;

    let stored_path =
        uploads::store(&state.config.upload_dir, PROFILE_PHOTOS, &file_name, &bytes).await?;
    customer.attach_photo(stored_path);
    repo.update(&customer).await?;

    info!(customer_id = %customer_id, "profile photo updated");

    Ok(Json((&customer).into()))
}
