// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Everything under the configured public prefixes (default `/public`).
// The authorization layer lets these through without a principal.

pub mod health;
pub mod info;

use axum::{routing::get, Router};

use crate::app::AppState;

pub use health::health_get;
pub use info::info_get;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(info_get))
        .route("/public/health", get(health_get))
}
