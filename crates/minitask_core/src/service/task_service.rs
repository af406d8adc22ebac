//! Task use-case service.
//!
//! # Responsibility
//! - Provide the list/get/create/update/toggle/delete entry points.
//! - Translate repository misses into a user-facing not-found error.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - `list_tasks` is always sorted by id ascending.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Input failed the title invariant.
    Validation(TaskValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task with id {id} not found"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Use-case service wrapper for task CRUD operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every task ordered by id ascending.
    pub fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks()?)
    }

    /// Gets one task by id.
    ///
    /// # Contract
    /// - Returns `TaskNotFound` when the id does not exist; callers never
    ///   observe a silent miss.
    pub fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Creates a task from a raw title.
    ///
    /// # Contract
    /// - Title is trimmed and validated before persistence.
    /// - New tasks start with `done = false`.
    /// - Returns the stored task with its assigned id.
    pub fn create_task(&self, title: impl AsRef<str>) -> TaskServiceResult<Task> {
        let draft = TaskDraft::new(title)?;
        let task = self.repo.insert_task(&draft)?;
        info!(
            "event=task_create module=service status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// # Contract
    /// - Fetches the current record first; absent ids yield `TaskNotFound`.
    /// - Absent patch fields keep their stored values.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskServiceResult<Task> {
        let mut task = self.get_task(id)?;
        patch.apply_to(&mut task)?;
        self.repo.update_task(&task)?;
        info!("event=task_update module=service status=ok task_id={id}");
        Ok(task)
    }

    /// Flips the completion flag of an existing task.
    pub fn toggle_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.get_task(id)?;
        task.done = !task.done;
        self.repo.update_task(&task)?;
        info!(
            "event=task_toggle module=service status=ok task_id={id} done={}",
            task.done
        );
        Ok(task)
    }

    /// Deletes a task by id.
    ///
    /// # Contract
    /// - Deleting a nonexistent id yields `TaskNotFound`, never a silent
    ///   no-op.
    pub fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }
}
