// handlers/public/health.rs - GET /public/health handler

use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database ping. 503 when the database cannot be reached.
pub async fn health_get(State(state): State<AppState>) -> ApiResult<Health> {
    let Some(database) = state.database.as_ref() else {
        return Ok(ApiResponse::success(Health {
            status: "ok",
            database: "not configured",
        }));
    };

    match database.health_check().await {
        Ok(()) => Ok(ApiResponse::success(Health {
            status: "ok",
            database: "up",
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}
