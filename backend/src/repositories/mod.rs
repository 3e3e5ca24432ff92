//! Persistence layer: one repository per table.
//!
//! Repositories borrow the shared pool, speak SQL, and return `anyhow::Result`;
//! business rules and error mapping live in the services above them.

pub mod alarm_repository;
pub mod device_repository;
pub mod tag_repository;
pub mod user_repository;
