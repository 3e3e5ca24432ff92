//! Error handling utilities for API responses.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a matching
//! status code. This module converts service-layer errors into that shape and
//! provides the JSON body extractor that reports malformed payloads the same
//! way.
//!
//! # Status mapping
//! - `Validation`, `AlreadyExists` → 400
//! - `InvalidCredentials` → 401
//! - `NotFound` → 404
//! - `Database`, `InternalError` → 500 (details logged, never returned)

use crate::errors::ServiceError;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error};

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Rejection type shared by handlers and extractors
pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Converts ServiceError to the appropriate HTTP response
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::Validation { message } => error_response(StatusCode::BAD_REQUEST, message),
        ServiceError::AlreadyExists { entity, identifier } => error_response(
            StatusCode::BAD_REQUEST,
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::InvalidCredentials => {
            error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
        }
        ServiceError::NotFound { entity, identifier } => {
            debug!("{} '{}' not found", entity, identifier);
            error_response(StatusCode::NOT_FOUND, format!("{} not found", entity))
        }
        ServiceError::Database { source } => {
            error!("Database error: {:#}", source);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
        ServiceError::InternalError { message } => {
            error!("Internal error: {}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// JSON body extractor whose rejection follows the API error format.
///
/// Missing, malformed, or mistyped bodies all become 400 `Invalid request`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(error_response(StatusCode::BAD_REQUEST, "Invalid request"))
            }
        }
    }
}
