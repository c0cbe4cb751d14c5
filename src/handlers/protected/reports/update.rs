// handlers/protected/reports/update.rs - PUT /reports handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{ReportView, UpdateReportRequest};

/// The report id travels in the body, next to the editable fields.
pub async fn report_put(
    State(state): State<AppState>,
    payload: Result<Json<UpdateReportRequest>, JsonRejection>,
) -> ApiResult<ReportView> {
    let Json(request) = payload?;
    let report = state.reports.update(request).await?;
    Ok(ApiResponse::success(report))
}
