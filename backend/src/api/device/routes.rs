//! Defines the HTTP routes for device management.

use super::handlers::{create_device, delete_device, get_device, list_devices, update_device};
use axum::{Router, routing::get};

pub fn device_router() -> Router {
    Router::new()
        .route("/", get(list_devices).post(create_device))
        .route(
            "/{id}",
            get(get_device).put(update_device).delete(delete_device),
        )
}
