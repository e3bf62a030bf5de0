//! Customer service handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use core_kernel::ReportId;
use domain_support::{ReportCategory, SupportReport};
use infra_db::ReportRepository;

use crate::auth::{has_role, Claims, ROLE_ADJUSTER};
use crate::dto::support::{CreateReportRequest, ReportResponse, UpdateReportStatusRequest};
use crate::error::ApiError;
use crate::handlers::current_customer_id;
use crate::AppState;

/// Files a new customer service report
pub async fn create_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    request.validate()?;
    let customer_id = current_customer_id(&claims)?;

    let category: ReportCategory = request.category.parse().map_err(ApiError::from)?;
    let report = SupportReport::file(
        customer_id,
        category,
        request.subject,
        request.description,
        Utc::now(),
    )?;

    ReportRepository::new(state.pool.clone()).insert(&report).await?;

    info!(report_id = %report.id, category = category.name(), "report filed");

    Ok((StatusCode::CREATED, Json((&report).into())))
}

/// Lists the authenticated customer's reports
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    let customer_id = current_customer_id(&claims)?;
    let reports = ReportRepository::new(state.pool.clone())
        .find_by_customer(customer_id)
        .await?;
    Ok(Json(reports.iter().map(Into::into).collect()))
}

/// Advances a report through its workflow (adjuster only)
pub async fn update_report_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(request): Json<UpdateReportStatusRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    if !has_role(&claims, ROLE_ADJUSTER) {
        return Err(ApiError::Forbidden("adjuster role required".to_string()));
    }

    let id: ReportId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid report id: {id}")))?;
    let repo = ReportRepository::new(state.pool.clone());
    let mut report = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Report {id}")))?;

    match request.status.as_str() {
        "in_progress" => report.start_progress(Utc::now())?,
        "resolved" => {
            let note = request.resolution_note.ok_or_else(|| {
                ApiError::BadRequest("resolution_note is required to resolve".to_string())
            })?;
            report.resolve(note, Utc::now())?;
        }
        other => {
            return Err(ApiError::BadRequest(format!(
                "unknown report status: {other}"
            )))
        }
    }
    repo.update(&report).await?;

    info!(report_id = %report.id, status = report.status.name(), "report status updated");

    Ok(Json((&report).into()))
}
