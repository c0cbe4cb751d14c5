// handlers/protected/reports/delete.rs - DELETE /reports/:id and /reports/citizen/:citizen_id

use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// 204 whether or not the report existed.
pub async fn report_delete(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;
    state.reports.delete_by_id(id).await?;
    Ok(ApiResponse::no_content())
}

pub async fn reports_by_citizen_delete(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(citizen_id) = path?;
    state.reports.delete_all_by_citizen(citizen_id).await?;
    Ok(ApiResponse::no_content())
}
