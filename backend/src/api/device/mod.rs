//! Module for device management API endpoints.

pub mod handlers;
pub mod routes;
