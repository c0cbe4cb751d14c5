// handlers/protected/questionnaires/list.rs - GET /questionnaires, /questionnaires/:id and /questionnaires/citizen/:citizen_id

use axum::extract::{rejection::PathRejection, Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::QuestionnaireView;

pub async fn questionnaires_get(State(state): State<AppState>) -> ApiResult<Vec<QuestionnaireView>> {
    Ok(ApiResponse::success(state.questionnaires.find_all().await?))
}

pub async fn questionnaire_get(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<QuestionnaireView>> {
    let Path(id) = path?;
    Ok(ApiResponse::success(state.questionnaires.find_by_id(id).await?))
}

pub async fn questionnaires_by_citizen(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<QuestionnaireView>> {
    let Path(citizen_id) = path?;
    Ok(ApiResponse::success(state.questionnaires.find_by_citizen(citizen_id).await?))
}
