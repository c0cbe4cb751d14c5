// handlers/protected/questionnaires/mod.rs - /questionnaires routes

pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod update;

use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/questionnaires",
            post(create::questionnaire_post)
                .put(update::questionnaire_put)
                .get(list::questionnaires_get),
        )
        .route("/questionnaires/search", get(search::questionnaires_search))
        .route("/questionnaires/municipality", get(search::questionnaires_by_municipality))
        .route(
            "/questionnaires/citizen/:citizen_id",
            get(list::questionnaires_by_citizen).delete(delete::questionnaires_by_citizen_delete),
        )
        .route(
            "/questionnaires/:id",
            get(list::questionnaire_get).delete(delete::questionnaire_delete),
        )
}
