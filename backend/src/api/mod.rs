//! Central module for organizing the application's API endpoints.
//!
//! `router` assembles the whole HTTP surface: the public auth routes under
//! `/api/auth`, and every other `/api` path behind the JWT middleware,
//! unmatched ones included. The database pool and the token verifier are
//! injected as `Extension`s.

pub mod alarm;
pub mod common;
pub mod device;
pub mod tag;

use crate::api::common::{ApiError, error_response};
use crate::auth::{handlers::me, middleware::jwt_auth, routes::auth_router};
use crate::utils::jwt::JwtUtils;
use axum::{
    Extension, Router,
    http::{
        Method, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    },
    middleware,
    response::Json,
    routing::get,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router with all routes and shared layers
pub fn router(pool: SqlitePool, jwt_utils: Arc<JwtUtils>) -> Router {
    let protected = Router::new()
        .route("/me", get(me))
        .nest("/devices", device::routes::device_router())
        .nest("/tags", tag::routes::tag_router())
        .nest("/alarms", alarm::routes::alarm_router())
        .fallback(api_not_found)
        .layer(middleware::from_fn(jwt_auth));

    let api = Router::new().nest("/auth", auth_router()).merge(protected);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION]);

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api)
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "SCADA Backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unmatched `/api` paths, reached only with a valid token
async fn api_not_found() -> ApiError {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let pool = test_pool().await;
            let jwt = Arc::new(JwtUtils::new("integration-secret"));
            Self {
                router: router(pool, jwt),
            }
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn register_and_login(&self, email: &str) -> String {
            let (status, _) = self
                .send(
                    "POST",
                    "/api/auth/register",
                    None,
                    Some(json!({"email": email, "password": "pw", "name": "A", "company": "Co"})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);

            let (status, body) = self
                .send(
                    "POST",
                    "/api/auth/login",
                    None,
                    Some(json!({"email": email, "password": "pw"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            body["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_register_login_and_access_protected_route() {
        let app = TestApp::new().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"email": "a@x.com", "password": "pw", "name": "A", "company": "Co"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["name"], "A");
        assert_eq!(body["company"], "Co");
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "a@x.com", "password": "pw"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"].get("password").is_none());

        let (status, body) = app.send("GET", "/api/devices", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = app.send("GET", "/api/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["company"], "Co");

        let (status, body) = app.send("GET", "/api/devices", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Missing authorization header"}));

        let (status, body) = app.send("GET", "/api/devices", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid token"}));
    }

    #[tokio::test]
    async fn test_login_failures_share_response() {
        let app = TestApp::new().await;
        app.register_and_login("a@x.com").await;

        let unknown = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "ghost@x.com", "password": "pw"})),
            )
            .await;
        let wrong = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "a@x.com", "password": "nope"})),
            )
            .await;

        assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown, wrong);
        assert_eq!(unknown.1, json!({"error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let app = TestApp::new().await;
        app.register_and_login("a@x.com").await;

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"email": "a@x.com", "password": "pw2", "name": "B", "company": "Co"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("already exists"));

        let (status, _) = app
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"email": "b@x.com", "password": "", "name": "B", "company": "Co"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send("POST", "/api/auth/register", None, Some(json!({"email": "c@x.com"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request"}));
    }

    #[tokio::test]
    async fn test_device_tag_alarm_lifecycle() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;
        let token = Some(token.as_str());

        let (status, device) = app
            .send(
                "POST",
                "/api/devices",
                token,
                Some(json!({"name": "PLC-1", "type": "PLC", "ip": "10.0.0.2"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(device["status"], "offline");
        let device_id = device["id"].as_str().unwrap().to_string();

        let (status, tag) = app
            .send(
                "POST",
                "/api/tags",
                token,
                Some(json!({
                    "device_id": device_id,
                    "name": "Temperature",
                    "address": "40001",
                    "data_type": "Float",
                    "unit": "C"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(tag["access"], "Read Only");
        let tag_id = tag["id"].as_str().unwrap().to_string();

        let (status, alarm) = app
            .send(
                "POST",
                "/api/alarms",
                token,
                Some(json!({"device_id": device_id, "message": "Overheat", "severity": "High"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(alarm["acknowledged"], false);
        let alarm_id = alarm["id"].as_str().unwrap().to_string();

        let (status, detail) = app
            .send("GET", &format!("/api/devices/{device_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["name"], "PLC-1");
        assert_eq!(detail["tags"][0]["id"], tag_id.as_str());
        assert_eq!(detail["alarms"][0]["id"], alarm_id.as_str());

        let (status, alarm) = app
            .send(
                "PUT",
                &format!("/api/alarms/{alarm_id}"),
                token,
                Some(json!({"acknowledged": true})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(alarm["acknowledged"], true);
        assert_eq!(alarm["message"], "Overheat");

        let (status, tag) = app
            .send(
                "PUT",
                &format!("/api/tags/{tag_id}"),
                token,
                Some(json!({"value": "71.5"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tag["value"], "71.5");

        let (status, _) = app
            .send("DELETE", &format!("/api/devices/{device_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send("GET", &format!("/api/devices/{device_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Device not found"}));

        let (status, _) = app
            .send("GET", &format!("/api/tags/{tag_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tag_requires_existing_device() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;

        let (status, body) = app
            .send(
                "POST",
                "/api/tags",
                Some(&token),
                Some(json!({
                    "device_id": "missing",
                    "name": "Flow",
                    "address": "40010",
                    "data_type": "Int"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Device not found"}));

        let (status, _) = app
            .send(
                "POST",
                "/api/devices",
                Some(&token),
                Some(json!({"name": "No type"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_root_is_public() {
        let app = TestApp::new().await;
        let (status, body) = app.send("GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "SCADA Backend");
    }

    #[tokio::test]
    async fn test_alarm_requires_existing_device() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;

        let (status, body) = app
            .send(
                "POST",
                "/api/alarms",
                Some(&token),
                Some(json!({"device_id": "missing", "message": "Overheat", "severity": "High"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Device not found"}));
    }

    #[tokio::test]
    async fn test_update_cannot_blank_required_fields() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;
        let token = Some(token.as_str());

        let (_, device) = app
            .send(
                "POST",
                "/api/devices",
                token,
                Some(json!({"name": "PLC-1", "type": "PLC"})),
            )
            .await;
        let device_id = device["id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/devices/{device_id}"),
                token,
                Some(json!({"name": ""})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name"));

        let (status, device) = app
            .send("GET", &format!("/api/devices/{device_id}"), token, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(device["name"], "PLC-1");

        let (status, _) = app
            .send(
                "PUT",
                "/api/devices/missing",
                token,
                Some(json!({"name": "PLC-2"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tag_and_alarm_list_and_delete() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;
        let token = Some(token.as_str());

        let (_, device) = app
            .send(
                "POST",
                "/api/devices",
                token,
                Some(json!({"name": "PLC-1", "type": "PLC"})),
            )
            .await;
        let device_id = device["id"].as_str().unwrap().to_string();

        let (_, tag) = app
            .send(
                "POST",
                "/api/tags",
                token,
                Some(json!({
                    "device_id": device_id,
                    "name": "Pressure",
                    "address": "40002",
                    "data_type": "Float"
                })),
            )
            .await;
        let (_, alarm) = app
            .send(
                "POST",
                "/api/alarms",
                token,
                Some(json!({"device_id": device_id, "message": "Low pressure", "severity": "Low"})),
            )
            .await;

        for (collection, created) in [("tags", &tag), ("alarms", &alarm)] {
            let (status, list) = app.send("GET", &format!("/api/{collection}"), token, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(list.as_array().unwrap().len(), 1);
            assert_eq!(list[0]["id"], created["id"]);

            let uri = format!("/api/{collection}/{}", created["id"].as_str().unwrap());
            let (status, body) = app.send("DELETE", &uri, token, None).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
            assert_eq!(body, Value::Null);

            let (status, _) = app.send("DELETE", &uri, token, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);

            let (status, list) = app.send("GET", &format!("/api/{collection}"), token, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(list, json!([]));
        }
    }

    #[tokio::test]
    async fn test_unknown_api_paths_require_auth() {
        let app = TestApp::new().await;
        let token = app.register_and_login("ops@x.com").await;

        let (status, body) = app.send("GET", "/api/unknown", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Missing authorization header"}));

        let (status, _) = app.send("GET", "/api/auth/unknown", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app.send("GET", "/api/unknown", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }
}
