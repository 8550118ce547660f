//! Router-level tests covering route mounting and the middleware
//! stack.
//!
//! The router is built over the in-memory test doubles with a
//! disconnected database handle; requests are driven through the full
//! tower stack, so these tests exercise method routing, bearer token
//! authentication, and the admin gate end to end.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use trailhead::api::create_router;
use trailhead::config::Config;
use trailhead::infra::Database;
use trailhead::services::{ApplicationDesk, EventCatalog, ReviewDesk, SessionGate};
use trailhead::AppState;

use common::{test_admin, test_application, test_event, test_user, TestStore};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn signed_token(email: &str) -> String {
    let now = Utc::now();
    let claims = json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "email": email,
        "exp": (now + Duration::hours(1)).timestamp(),
        "iat": now.timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn build_router(store: &TestStore) -> Router {
    let repo = Arc::new(store.clone());
    let config = Config::new("postgres://unused", TEST_SECRET, "127.0.0.1", 0);

    let identity = Arc::new(SessionGate::new(repo.clone(), config));
    let events = Arc::new(EventCatalog::new(repo.clone()));
    let applications = Arc::new(ApplicationDesk::new(repo.clone(), repo.clone()));
    let admin = Arc::new(ReviewDesk::new(repo));

    let database = Arc::new(Database::from_connection(
        sea_orm::DatabaseConnection::Disconnected,
    ));

    create_router(AppState::new(identity, events, applications, admin, database))
}

async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn patch_updates_own_application() {
    let store = TestStore::new();
    let user = store.add_user(test_user("camper@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let (status, body) = send(
        build_router(&store),
        Method::PATCH,
        &format!("/api/applications/{}", application.id),
        Some(&signed_token("camper@example.com")),
        Some(json!({ "applicantName": "Updated Name" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["applicantName"], json!("Updated Name"));
}

#[tokio::test]
async fn put_on_own_application_is_not_mounted() {
    let store = TestStore::new();
    let user = store.add_user(test_user("camper@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let (status, _) = send(
        build_router(&store),
        Method::PUT,
        &format!("/api/applications/{}", application.id),
        Some(&signed_token("camper@example.com")),
        Some(json!({ "applicantName": "Updated Name" })),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn admin_patches_application_status_directly_on_resource() {
    let store = TestStore::new();
    store.add_user(test_admin("boss@example.com"));
    let user = store.add_user(test_user("camper@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let (status, body) = send(
        build_router(&store),
        Method::PATCH,
        &format!("/api/admin/applications/{}", application.id),
        Some(&signed_token("boss@example.com")),
        Some(json!({ "status": "approved" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("approved"));
    assert!(body["data"]["reviewedBy"].is_string());
}

#[tokio::test]
async fn admin_status_route_has_no_suffix() {
    let store = TestStore::new();
    store.add_user(test_admin("boss@example.com"));
    let user = store.add_user(test_user("camper@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let (status, _) = send(
        build_router(&store),
        Method::PATCH,
        &format!("/api/admin/applications/{}/status", application.id),
        Some(&signed_token("boss@example.com")),
        Some(json!({ "status": "approved" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admin_is_rejected_from_admin_routes() {
    let store = TestStore::new();
    store.add_user(test_user("camper@example.com"));

    let (status, body) = send(
        build_router(&store),
        Method::GET,
        "/api/admin/applications",
        Some(&signed_token("camper@example.com")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let store = TestStore::new();

    let (status, body) = send(
        build_router(&store),
        Method::GET,
        "/api/applications",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));
}
