//! Defines the HTTP routes for device tags.

use super::handlers::{create_tag, delete_tag, get_tag, list_tags, update_tag};
use axum::{Router, routing::get};

pub fn tag_router() -> Router {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/{id}", get(get_tag).put(update_tag).delete(delete_tag))
}
