//! Middleware for protecting authenticated routes.
//!
//! Requests without a valid `Authorization: Bearer <token>` header are
//! answered with 401 before reaching any handler. Accepted requests carry the
//! decoded `Claims` in their extensions.

use crate::auth::errors::AuthError;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers()).inspect_err(|e| debug!("Auth rejected: {}", e))?;

    let claims = jwt_utils.validate_token(token).map_err(|e| {
        debug!("Auth rejected: {}", e);
        AuthError::InvalidToken(e)
    })?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingAuthHeader)?;

    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidTokenFormat)
}
