// handlers/protected/questionnaires/delete.rs - DELETE /questionnaires/:id and /questionnaires/citizen/:citizen_id

use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn questionnaire_delete(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;
    state.questionnaires.delete_by_id(id).await?;
    Ok(ApiResponse::no_content())
}

pub async fn questionnaires_by_citizen_delete(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(citizen_id) = path?;
    state.questionnaires.delete_all_by_citizen(citizen_id).await?;
    Ok(ApiResponse::no_content())
}
