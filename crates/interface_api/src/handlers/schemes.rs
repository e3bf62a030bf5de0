//! Plan catalog handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use core_kernel::Money;
use domain_policy::calculate_premium;

use crate::dto::policy::{QuoteParams, QuoteResponse, SchemeResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists all plans on the shelf
pub async fn list_schemes(State(state): State<AppState>) -> Json<Vec<SchemeResponse>> {
    Json(state.catalog.schemes().iter().map(Into::into).collect())
}

/// Gets a single plan by code
pub async fn get_scheme(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SchemeResponse>, ApiError> {
    let scheme = state.catalog.require(&code)?;
    Ok(Json(scheme.into()))
}

/// Quotes the premium for a plan without creating anything
pub async fn quote_scheme(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>, ApiError> {
    params.validate()?;
    let scheme = state.catalog.require(&code)?;
    let cover = Money::rupees(params.cover);
    let quote = calculate_premium(scheme, params.age, cover)?;
    Ok(Json(QuoteResponse::new(&scheme.code, params.age, cover, &quote)))
}
