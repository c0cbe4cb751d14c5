// handlers/protected/questionnaires/search.rs - GET /questionnaires/search and /questionnaires/municipality

use axum::extract::{rejection::QueryRejection, Query, State};

use crate::app::AppState;
use crate::database::models::QuestionnaireCriteria;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{MunicipalitySearch, QuestionnaireView};

pub async fn questionnaires_search(
    State(state): State<AppState>,
    query: Result<Query<QuestionnaireCriteria>, QueryRejection>,
) -> ApiResult<Vec<QuestionnaireView>> {
    let Query(criteria) = query?;
    Ok(ApiResponse::success(state.questionnaires.find_by_criteria(&criteria).await?))
}

pub async fn questionnaires_by_municipality(
    State(state): State<AppState>,
    query: Result<Query<MunicipalitySearch>, QueryRejection>,
) -> ApiResult<Vec<QuestionnaireView>> {
    let Query(search) = query?;
    Ok(ApiResponse::success(state.questionnaires.find_by_municipality(&search).await?))
}
