//! Bearer token gatekeeper.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use auth_service_lib::token::TokenVerification;
use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;

use crate::state::AppState;

/// Collaborator authenticated by the presented token.
#[derive(Debug, Clone)]
pub struct CurrentCollaborator {
    pub code: String,
}

/// Rejects requests without a valid bearer token. Expired tokens get the
/// distinct `TOKEN_EXPIRED` error.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;

    let code = match state.auth.verify_token(&token) {
        TokenVerification::Valid(claims) => claims.sub,
        TokenVerification::Expired(claims) => {
            debug!(code = %claims.sub, "Expired token presented");
            return Err(AppError::TokenExpired);
        }
        TokenVerification::Invalid => return Err(AppError::Unauthorized),
    };

    request.extensions_mut().insert(CurrentCollaborator { code });

    Ok(next.run(request).await)
}

fn extract_token(request: &Request<Body>) -> AppResult<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
