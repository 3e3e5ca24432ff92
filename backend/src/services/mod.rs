//! Module for core business logic services.
//!
//! Services validate incoming payloads, enforce the parent-device reference
//! for tags and alarms, and translate repository results into `ServiceError`.

pub mod alarm_service;
pub mod device_service;
pub mod tag_service;
