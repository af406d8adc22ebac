//! Router construction and CORS policy.
//!
//! # Responsibility
//! - Bind HTTP methods/paths to handlers and mount them under `/api/v1`.
//! - Restrict cross-origin access to the two local development origins.
//!
//! # Invariants
//! - Collection routes answer with and without the trailing slash; axum
//!   matches exact paths, so both spellings are registered.
//! - The request-context layer is outermost so every response carries an
//!   `x-request-id` header.

use crate::handlers::{health, tasks};
use crate::middleware::request_context;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

fn allowed_origins() -> [HeaderValue; 2] {
    [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://localhost:5173"),
    ]
}

/// Creates the API router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/toggle", axum::routing::post(tasks::toggle_task));

    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health))
        .nest("/api/v1", api_v1)
        .layer(cors_layer())
        .layer(middleware::from_fn(request_context))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
