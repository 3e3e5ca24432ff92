//! Defines the public HTTP routes for authentication.
//!
//! Registration and login are the only endpoints reachable without a token.
//! The router is nested under `/api/auth` by `api::router`.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
