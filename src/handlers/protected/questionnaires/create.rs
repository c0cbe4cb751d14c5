// handlers/protected/questionnaires/create.rs - POST /questionnaires handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{QuestionnaireFields, QuestionnaireView};

pub async fn questionnaire_post(
    State(state): State<AppState>,
    payload: Result<Json<QuestionnaireFields>, JsonRejection>,
) -> ApiResult<QuestionnaireView> {
    let Json(fields) = payload?;
    let questionnaire = state.questionnaires.create(fields).await?;
    Ok(ApiResponse::created(questionnaire))
}
