use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::Principal;
use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Which paths may be reached without an authenticated principal.
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    public_prefixes: Vec<String>,
}

impl AuthorizationPolicy {
    pub fn new(public_prefixes: Vec<String>) -> Self {
        let public_prefixes = public_prefixes
            .into_iter()
            .map(|p| p.trim_end_matches('/').to_string())
            .collect();
        Self { public_prefixes }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.public_paths.clone())
    }

    /// `/public` covers `/public` and `/public/health`, not `/publicity`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes.iter().any(|prefix| match path.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        })
    }
}

/// Rejects requests to non-public paths that carry no principal.
pub async fn authorize_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path();
    if state.policy.is_public(path) || request.extensions().get::<Principal>().is_some() {
        return Ok(next.run(request).await);
    }

    tracing::debug!("Unauthenticated request to {}", path);
    Err(ApiError::unauthorized("Authentication required"))
}
