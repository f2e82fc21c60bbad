//! Bearer-token gate for protected routes

use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::token::TokenRejection;
use crate::common::{safe_email_log, safe_token_log, ApiError, AppState};

/// Pulls the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty
/// token, counts as missing.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenRejection> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(TokenRejection::Missing)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(TokenRejection::Missing)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(TokenRejection::Missing);
    }
    Ok(token)
}

/// Verifies the bearer token and attaches its `Claims` to the request.
///
/// Rejected requests never reach the handler. No database access happens here.
pub async fn require_auth(
    Extension(state): Extension<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(|kind| {
        warn!(path = %request.uri().path(), "Authentication failed: missing bearer token");
        kind
    })?;

    let claims = state.tokens.verify(token).map_err(|kind| {
        warn!(
            path = %request.uri().path(),
            reason = kind.code(),
            token = %safe_token_log(token),
            "Authentication failed: token rejected"
        );
        kind
    })?;

    debug!(
        user_id = %claims.sub,
        email = %safe_email_log(&claims.email),
        "Request authenticated"
    );

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
