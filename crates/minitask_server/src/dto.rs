//! Request/response DTOs for the task endpoints.
//!
//! # Responsibility
//! - Define the accepted request shapes and the serialized response shape.
//! - Reject invalid input at the schema boundary, before the service layer
//!   runs.
//!
//! # Invariants
//! - Title constraints here are the model constraints; validation delegates
//!   to the core draft type so the two can never drift apart.

use crate::error::ApiError;
use minitask_core::{Task, TaskDraft, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// Request body for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (1-200 characters after trimming).
    pub title: String,
}

impl CreateTaskRequest {
    /// Validates the title against the model constraints.
    pub fn validate(&self) -> Result<(), ApiError> {
        TaskDraft::new(&self.title)
            .map(|_| ())
            .map_err(|err| ApiError::Validation {
                message: err.to_string(),
            })
    }
}

/// Request body for partially updating a task.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl UpdateTaskRequest {
    /// Converts the request into a validated core patch.
    pub fn into_patch(self) -> Result<TaskPatch, ApiError> {
        if let Some(title) = &self.title {
            TaskDraft::new(title).map_err(|err| ApiError::Validation {
                message: err.to_string(),
            })?;
        }

        Ok(TaskPatch {
            title: self.title,
            done: self.done,
        })
    }
}

/// Serialized task returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            done: task.done,
        }
    }
}

/// Response body for the service info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::{CreateTaskRequest, UpdateTaskRequest};

    #[test]
    fn create_request_rejects_empty_and_oversized_titles() {
        assert!(CreateTaskRequest {
            title: "  ".to_string()
        }
        .validate()
        .is_err());
        assert!(CreateTaskRequest {
            title: "x".repeat(201)
        }
        .validate()
        .is_err());
        assert!(CreateTaskRequest {
            title: "ok".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn update_request_validates_title_when_present() {
        let bad = UpdateTaskRequest {
            title: Some(String::new()),
            done: None,
        };
        assert!(bad.into_patch().is_err());

        let good = UpdateTaskRequest {
            title: None,
            done: Some(true),
        };
        let patch = good.into_patch().unwrap();
        assert_eq!(patch.done, Some(true));
        assert!(patch.title.is_none());
    }
}
