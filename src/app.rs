use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Repositories};
use crate::handlers::{protected, public};
use crate::middleware::{authorize_middleware, cors_layer, jwt_auth_middleware, AuthorizationPolicy};
use crate::services::{QuestionnaireService, ReportService};

/// Shared by every handler and middleware. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub reports: ReportService,
    pub questionnaires: QuestionnaireService,
    pub tokens: Arc<TokenService>,
    pub policy: Arc<AuthorizationPolicy>,
    /// Absent when running without a database (router tests).
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        repositories: &Repositories,
        tokens: TokenService,
        policy: AuthorizationPolicy,
        database: Option<DatabaseManager>,
    ) -> Self {
        Self {
            reports: ReportService::new(repositories),
            questionnaires: QuestionnaireService::new(repositories),
            tokens: Arc::new(tokens),
            policy: Arc::new(policy),
            database,
        }
    }

    /// State backed by the PostgreSQL repositories of `database`.
    pub fn postgres(database: DatabaseManager, config: &AppConfig) -> anyhow::Result<Self> {
        let tokens = TokenService::from_config(&config.security)?;
        let repositories = Repositories::postgres(database.pool().clone());
        Ok(Self::new(
            &repositories,
            tokens,
            AuthorizationPolicy::from_config(&config.security),
            Some(database),
        ))
    }
}

/// Builds the full HTTP surface.
///
/// Layers run outermost first: tracing, CORS (answers preflight on its own),
/// authentication, authorization, then the body limit and the handler.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(public::routes())
        .merge(protected::routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(from_fn_with_state(state.clone(), authorize_middleware))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
        .layer(cors_layer(&config.security))
        .with_state(state);

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
