// handlers/protected/questionnaires/update.rs - PUT /questionnaires handler

use axum::extract::{rejection::JsonRejection, State};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::auth::Principal;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{QuestionnaireView, UpdateQuestionnaireRequest};

pub async fn questionnaire_put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<UpdateQuestionnaireRequest>, JsonRejection>,
) -> ApiResult<QuestionnaireView> {
    let Json(request) = payload?;
    let questionnaire = state.questionnaires.update(request, &principal).await?;
    Ok(ApiResponse::success(questionnaire))
}
