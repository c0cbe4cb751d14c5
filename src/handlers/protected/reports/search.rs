// handlers/protected/reports/search.rs - GET /reports/search and /reports/municipality

use axum::extract::{rejection::QueryRejection, Query, State};

use crate::app::AppState;
use crate::database::models::ReportCriteria;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{MunicipalitySearch, ReportView};

/// Reports matching any of the given criteria.
pub async fn reports_search(
    State(state): State<AppState>,
    query: Result<Query<ReportCriteria>, QueryRejection>,
) -> ApiResult<Vec<ReportView>> {
    let Query(criteria) = query?;
    Ok(ApiResponse::success(state.reports.find_by_criteria(&criteria).await?))
}

pub async fn reports_by_municipality(
    State(state): State<AppState>,
    query: Result<Query<MunicipalitySearch>, QueryRejection>,
) -> ApiResult<Vec<ReportView>> {
    let Query(search) = query?;
    Ok(ApiResponse::success(state.reports.find_by_municipality(&search).await?))
}
