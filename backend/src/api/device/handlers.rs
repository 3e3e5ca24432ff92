//! Handler functions for device management API endpoints.
//!
//! These functions process requests for devices, delegate to
//! `DeviceService`, and return device data. Device creation records the
//! authenticated caller as the owner.

use crate::api::common::{ApiError, JsonBody, service_error_to_http};
use crate::database::models::{CreateDevice, Device, DeviceWithChildren, UpdateDevice};
use crate::services::device_service::DeviceService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn list_devices(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let service = DeviceService::new(&pool);

    match service.list_devices().await {
        Ok(devices) => Ok(Json(devices)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn create_device(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    JsonBody(payload): JsonBody<CreateDevice>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let service = DeviceService::new(&pool);

    match service.create_device(claims.user_id(), payload).await {
        Ok(device) => Ok((StatusCode::CREATED, Json(device))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Returns the device with its tags and alarms embedded
#[axum::debug_handler]
pub async fn get_device(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<DeviceWithChildren>, ApiError> {
    let service = DeviceService::new(&pool);

    match service.get_device_with_children(&id).await {
        Ok(device) => Ok(Json(device)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_device(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateDevice>,
) -> Result<Json<Device>, ApiError> {
    let service = DeviceService::new(&pool);

    match service.update_device(&id, payload).await {
        Ok(device) => Ok(Json(device)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_device(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = DeviceService::new(&pool);

    match service.delete_device(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
