//! Module for alarm API endpoints.

pub mod handlers;
pub mod routes;
