// handlers/protected/reports/create.rs - POST /reports handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{ReportFields, ReportView};

pub async fn report_post(
    State(state): State<AppState>,
    payload: Result<Json<ReportFields>, JsonRejection>,
) -> ApiResult<ReportView> {
    let Json(fields) = payload?;
    let report = state.reports.create(fields).await?;
    Ok(ApiResponse::created(report))
}
