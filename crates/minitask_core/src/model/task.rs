//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its creation/update inputs.
//! - Enforce the title invariant before any SQL mutation.
//!
//! # Invariants
//! - `id` is store-assigned, monotonic and never reused.
//! - `title` is trimmed, non-empty and at most `TITLE_MAX_CHARS` characters.
//! - `done` defaults to `false` for newly created tasks.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted title length, counted in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Stable store-assigned identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Validation failure for task titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming surrounding whitespace.
    EmptyTitle,
    /// Title exceeds `TITLE_MAX_CHARS` characters.
    TitleTooLong { length: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::TitleTooLong { length } => write!(
                f,
                "task title is {length} characters, maximum is {TITLE_MAX_CHARS}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, unique across the task table lifetime.
    pub id: TaskId,
    /// Trimmed display title.
    pub title: String,
    /// Completion flag.
    pub done: bool,
}

impl Task {
    /// Checks the title invariant on an already-persisted record.
    ///
    /// Read paths use this to reject invalid stored state instead of
    /// masking it; write paths call it before SQL mutations.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title).map(|_| ())
    }
}

/// Validated creation input for a task that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
}

impl TaskDraft {
    /// Builds a draft from raw client input.
    ///
    /// # Contract
    /// - Surrounding whitespace is trimmed before validation.
    /// - Empty and oversized titles are rejected.
    pub fn new(title: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let title = validate_title(title.as_ref())?;
        Ok(Self { title })
    }

    /// Returns the normalized title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Partial update input for an existing task.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title, trimmed and validated on application.
    pub title: Option<String>,
    /// Replacement completion flag.
    pub done: Option<bool>,
}

impl TaskPatch {
    /// Applies the patch to a task, validating any provided title.
    ///
    /// # Contract
    /// - `title: None` keeps the stored title; `done: None` keeps the flag.
    /// - A provided title goes through the same trim+validate path as
    ///   creation.
    pub fn apply_to(&self, task: &mut Task) -> Result<(), TaskValidationError> {
        if let Some(title) = &self.title {
            task.title = validate_title(title)?;
        }
        if let Some(done) = self.done {
            task.done = done;
        }
        Ok(())
    }

    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }
}

fn validate_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(TaskValidationError::TitleTooLong { length });
    }
    Ok(trimmed.to_string())
}
