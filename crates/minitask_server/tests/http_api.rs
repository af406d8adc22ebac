use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use minitask_core::ConnectionPool;
use minitask_server::routes::create_router;
use minitask_server::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let pool = ConnectionPool::open(dir.path().join("api.db")).unwrap();
    let router = create_router(AppState::new(pool));
    (dir, router)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_task(app: &Router, title: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(Method::POST, "/api/v1/tasks", json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn list_starts_empty() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/api/v1/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_list_and_get() {
    let (_dir, app) = test_app();

    let created = create_task(&app, "  write docs ").await;
    assert_eq!(created["title"], "write docs");
    assert_eq!(created["done"], false);
    let id = created["id"].as_i64().unwrap();
    assert!(id >= 1);

    let (status, listed) = send(&app, get("/api/v1/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], created);

    let (status, fetched) = send(&app, get(&format!("/api/v1/tasks/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn collection_routes_answer_both_trailing_slash_spellings() {
    let (_dir, app) = test_app();

    let (status, _) = send(&app, get("/api/v1/tasks/")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/tasks/", json!({ "title": "slash" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "slash");
}

#[tokio::test]
async fn patch_updates_only_provided_fields() {
    let (_dir, app) = test_app();

    let created = create_task(&app, "original").await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/v1/tasks/{id}"),
            json!({ "done": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "original");
    assert_eq!(updated["done"], true);

    let (status, updated) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/v1/tasks/{id}"),
            json!({ "title": "renamed" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "renamed");
    assert_eq!(updated["done"], true);
}

#[tokio::test]
async fn toggle_twice_restores_original_state() {
    let (_dir, app) = test_app();

    let created = create_task(&app, "flip me").await;
    let id = created["id"].as_i64().unwrap();
    let toggle_uri = format!("/api/v1/tasks/{id}/toggle");

    let (status, toggled) = send(&app, empty_request(Method::POST, &toggle_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["done"], true);

    let (status, restored) = send(&app, empty_request(Method::POST, &toggle_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["done"], false);
    assert_eq!(restored["title"], "flip me");
}

#[tokio::test]
async fn delete_returns_no_content_then_get_is_404() {
    let (_dir, app) = test_app();

    let created = create_task(&app, "short lived").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/v1/tasks/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, get(&format!("/api/v1/tasks/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "TASK_NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        format!("task with id {id} not found")
    );
}

#[tokio::test]
async fn mutations_on_missing_ids_are_404() {
    let (_dir, app) = test_app();

    let (status, _) = send(&app, get("/api/v1/tasks/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request(Method::PATCH, "/api/v1/tasks/99", json!({ "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request(Method::POST, "/api/v1/tasks/99/toggle")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request(Method::DELETE, "/api/v1/tasks/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "TASK_NOT_FOUND");
}

#[tokio::test]
async fn invalid_titles_are_rejected_before_persistence() {
    let (_dir, app) = test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/tasks", json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/tasks",
            json!({ "title": "x".repeat(201) }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let created = create_task(&app, "stable").await;
    let id = created["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/v1/tasks/{id}"),
            json!({ "title": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&app, get("/api/v1/tasks")).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "stable");
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let (_dir, app) = test_app();

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/v1/tasks", json!({ "done": true })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn info_and_health_endpoints_respond() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "MiniTask API");
    assert!(body["version"].as_str().is_some());

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (_dir, app) = test_app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "caller-supplied-id")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "caller-supplied-id"
    );
}

#[tokio::test]
async fn cors_preflight_allows_known_dev_origins() {
    let (_dir, app) = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/tasks")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/tasks")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
