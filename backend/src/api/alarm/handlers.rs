//! Handler functions for alarm API endpoints.
//!
//! Acknowledging an alarm is a partial update with `{"acknowledged": true}`.

use crate::api::common::{ApiError, JsonBody, service_error_to_http};
use crate::database::models::{Alarm, CreateAlarm, UpdateAlarm};
use crate::services::alarm_service::AlarmService;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn list_alarms(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<Vec<Alarm>>, ApiError> {
    match AlarmService::new(&pool).list_alarms().await {
        Ok(alarms) => Ok(Json(alarms)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn create_alarm(
    Extension(pool): Extension<SqlitePool>,
    JsonBody(payload): JsonBody<CreateAlarm>,
) -> Result<(StatusCode, Json<Alarm>), ApiError> {
    match AlarmService::new(&pool).create_alarm(payload).await {
        Ok(alarm) => Ok((StatusCode::CREATED, Json(alarm))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_alarm(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Alarm>, ApiError> {
    match AlarmService::new(&pool).get_alarm_required(&id).await {
        Ok(alarm) => Ok(Json(alarm)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_alarm(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateAlarm>,
) -> Result<Json<Alarm>, ApiError> {
    match AlarmService::new(&pool).update_alarm(&id, payload).await {
        Ok(alarm) => Ok(Json(alarm)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_alarm(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match AlarmService::new(&pool).delete_alarm(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
