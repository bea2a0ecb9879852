use crate::{AppState, error::AppError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use uuid::Uuid;

/// The logged-in user behind a request's `Authorization: Bearer <token>` header.
///
/// Adding this extractor to a handler makes the route require a live session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| Uuid::parse_str(token.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        let username = state
            .sessions
            .resolve(token)?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { username, token })
    }
}
