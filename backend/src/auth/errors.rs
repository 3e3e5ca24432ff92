//! Rejections produced by the authentication middleware.

use crate::api::common::error_response;
use crate::utils::jwt::TokenError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// The verifier's reason is kept for logs; clients only see `Invalid token`.
    #[error("Invalid token")]
    InvalidToken(TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}
