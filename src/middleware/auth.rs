use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{Principal, TokenService};
use crate::error::ApiError;

/// Bearer-token authentication.
///
/// Requests without a usable `Authorization: Bearer` header pass through
/// unauthenticated; whether that is acceptable is decided later by the
/// authorization layer. A bearer token that fails validation ends the request
/// with 401. A valid token attaches a [`Principal`] to the request extensions
/// unless one is already present.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return Ok(next.run(request).await);
    };

    let subject = authenticate(&state.tokens, &token).map_err(|msg| {
        tracing::debug!("Rejecting {} {}: {}", request.method(), request.uri().path(), msg);
        ApiError::unauthorized(msg)
    })?;

    if request.extensions().get::<Principal>().is_none() {
        request.extensions_mut().insert(Principal::new(subject));
    }

    Ok(next.run(request).await)
}

/// Token of an `Authorization: Bearer <token>` header, if there is one.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(str::to_string)
}

fn authenticate(tokens: &TokenService, token: &str) -> Result<String, String> {
    if !tokens.validate(token) {
        return Err("Invalid or expired token".to_string());
    }

    let subject = tokens
        .extract_subject(token)
        .map_err(|e| format!("Invalid token: {}", e))?;

    if subject.is_empty() {
        return Err("Token has no subject".to_string());
    }
    Ok(subject)
}
