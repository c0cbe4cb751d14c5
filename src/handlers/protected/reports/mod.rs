// handlers/protected/reports/mod.rs - /reports routes

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
            "/reports",
            post(create::report_post).put(update::report_put).get(list::reports_get),
        )
        .route("/reports/search", get(search::reports_search))
        .route("/reports/municipality", get(search::reports_by_municipality))
        .route(
            "/reports/citizen/:citizen_id",
            get(list::reports_by_citizen).delete(delete::reports_by_citizen_delete),
        )
        .route("/reports/:id", get(list::report_get).delete(delete::report_delete))
}
