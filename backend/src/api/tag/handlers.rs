//! Handler functions for tag API endpoints.

use crate::api::common::{ApiError, JsonBody, service_error_to_http};
use crate::database::models::{CreateTag, Tag, UpdateTag};
use crate::services::tag_service::TagService;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

#[axum::debug_handler]
pub async fn list_tags(Extension(pool): Extension<SqlitePool>) -> Result<Json<Vec<Tag>>, ApiError> {
    match TagService::new(&pool).list_tags().await {
        Ok(tags) => Ok(Json(tags)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn create_tag(
    Extension(pool): Extension<SqlitePool>,
    JsonBody(payload): JsonBody<CreateTag>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    match TagService::new(&pool).create_tag(payload).await {
        Ok(tag) => Ok((StatusCode::CREATED, Json(tag))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn get_tag(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<Tag>, ApiError> {
    match TagService::new(&pool).get_tag_required(&id).await {
        Ok(tag) => Ok(Json(tag)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn update_tag(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateTag>,
) -> Result<Json<Tag>, ApiError> {
    match TagService::new(&pool).update_tag(&id, payload).await {
        Ok(tag) => Ok(Json(tag)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_tag(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match TagService::new(&pool).delete_tag(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
