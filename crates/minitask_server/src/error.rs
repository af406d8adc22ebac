//! API error type and JSON error envelope.
//!
//! # Responsibility
//! - Map core service errors onto HTTP statuses and stable error codes.
//! - Keep internal failure details in the log, never in the response body.
//!
//! # Invariants
//! - Every error body has the shape
//!   `{"error": {"code": "...", "message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use minitask_core::db::DbError;
use minitask_core::{RepoError, TaskId, TaskServiceError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("task with id {id} not found")]
    NotFound { id: TaskId },

    #[error("{message}")]
    Validation { message: String },

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "TASK_NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::TaskNotFound(id) => Self::NotFound { id },
            TaskServiceError::Validation(err) => Self::Validation {
                message: err.to_string(),
            },
            TaskServiceError::Repo(err) => {
                error!("event=service_failure module=server status=error error={err}");
                Self::Internal
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        error!("event=repo_failure module=server status=error error={value}");
        Self::Internal
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        error!("event=db_failure module=server status=error error={value}");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// JSON error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use minitask_core::{TaskServiceError, TaskValidationError};

    #[test]
    fn service_not_found_maps_to_404() {
        let api: ApiError = TaskServiceError::TaskNotFound(12).into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.error_code(), "TASK_NOT_FOUND");
        assert_eq!(api.to_string(), "task with id 12 not found");
    }

    #[test]
    fn service_validation_maps_to_400() {
        let api: ApiError = TaskServiceError::Validation(TaskValidationError::EmptyTitle).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn internal_error_hides_details() {
        let api = ApiError::Internal;
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.to_string(), "internal server error");
    }
}
