//! Task CRUD handlers.
//!
//! # Responsibility
//! - Bind the six task operations to the core service layer.
//!
//! # Invariants
//! - Each handler checks out one pooled connection; the session is returned
//!   on every exit path when the guard drops.
//! - Request validation happens before the service layer is reached.

use crate::dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use minitask_core::{SqliteTaskRepository, TaskId, TaskService};

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskResponse>>> {
    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    let tasks = service.list_tasks()?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskResponse>> {
    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    let task = service.get_task(id)?;
    Ok(Json(task.into()))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    request.validate()?;

    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    let task = service.create_task(&request.title)?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let patch = request.into_patch()?;

    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    let task = service.update_task(id, &patch)?;
    Ok(Json(task.into()))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskResponse>> {
    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    let task = service.toggle_task(id)?;
    Ok(Json(task.into()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> ApiResult<StatusCode> {
    let conn = state.pool.checkout()?;
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);

    service.delete_task(id)?;
    Ok(StatusCode::NO_CONTENT)
}
