//! Authentication module for user accounts and access control.
//!
//! This module provides registration, login and token issuance, and the
//! middleware that gates every protected route behind a valid bearer token.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
