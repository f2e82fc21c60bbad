//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::models::Claims;
use super::token::TokenRejection;
use crate::common::ApiError;

/// The caller's identity, as attached by `require_auth`.
///
/// Only usable on routes behind the gate; elsewhere it rejects as a missing
/// token.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(ApiError::TokenRejected(TokenRejection::Missing))?;

        Ok(AuthedUser {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            claims,
        })
    }
}
