//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse incoming requests for registration and login, hand
//! them to `auth::service`, and translate the outcome into HTTP responses.

use crate::api::common::{ApiError, JsonBody, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{extract::Extension, http::StatusCode, response::Json};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    let auth_service = AuthService::new(&pool, &jwt_utils);

    match auth_service.register(payload).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let auth_service = AuthService::new(&pool, &jwt_utils);

    match auth_service.login(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<UserInfo> {
    Json(UserInfo::from(claims))
}
