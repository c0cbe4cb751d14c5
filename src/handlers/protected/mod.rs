// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind the authentication and authorization layers;
// handlers that need the caller take `Extension<Principal>`.

pub mod hello;
pub mod questionnaires;
pub mod reports;

use axum::{routing::get, Router};

use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/private/secure/hello", get(hello::hello_get))
        .merge(reports::routes())
        .merge(questionnaires::routes())
}
