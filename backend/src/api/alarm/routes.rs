//! Defines the HTTP routes for device alarms.

use super::handlers::{create_alarm, delete_alarm, get_alarm, list_alarms, update_alarm};
use axum::{Router, routing::get};

pub fn alarm_router() -> Router {
    Router::new()
        .route("/", get(list_alarms).post(create_alarm))
        .route(
            "/{id}",
            get(get_alarm).put(update_alarm).delete(delete_alarm),
        )
}
