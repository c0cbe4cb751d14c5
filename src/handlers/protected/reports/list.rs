// handlers/protected/reports/list.rs - GET /reports, /reports/:id and /reports/citizen/:citizen_id

use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReportView;

pub async fn reports_get(State(state): State<AppState>) -> ApiResult<Vec<ReportView>> {
    Ok(ApiResponse::success(state.reports.find_all().await?))
}

/// Always a list: empty when the id is unknown.
pub async fn report_get(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<ReportView>> {
    let Path(id) = path?;
    Ok(ApiResponse::success(state.reports.find_by_id(id).await?))
}

pub async fn reports_by_citizen(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<ReportView>> {
    let Path(citizen_id) = path?;
    Ok(ApiResponse::success(state.reports.find_by_citizen(citizen_id).await?))
}
