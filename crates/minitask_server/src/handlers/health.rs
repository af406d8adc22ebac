//! Service info and health endpoints.

use crate::dto::{HealthResponse, ServiceInfoResponse};
use axum::Json;

/// Root endpoint with service identification.
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "MiniTask API".to_string(),
        version: minitask_core::core_version().to_string(),
    })
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
