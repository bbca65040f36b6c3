/// Personal task endpoints
///
/// # Endpoints
///
/// - `POST /registerTask` - Create a task
/// - `GET /tasks` - Tasks owned by the identity in the `Authorization` header
/// - `DELETE /tasks/:id` - Delete a task
/// - `PUT /updateTask/:id` - Overwrite task, date and status

use super::{validate, MessageResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, HeaderIdentity},
};
use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    db::Record,
    models::task::{CreateTask, Task, UpdateTask},
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "task is required"))]
    pub task: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,

    pub user_name: Option<String>,
    pub status: Option<String>,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub message: &'static str,
    pub id: String,
}

/// Update task request; every field is required
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "task is required"))]
    pub task: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Creates a personal task
///
/// `userName` and `status` are stored as sent. The creation time is set by
/// the store.
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<Json<CreateTaskResponse>> {
    validate(&req, "task and date are required")?;

    let id = Task::create(
        state.store(),
        CreateTask {
            user_name: req.user_name,
            task: req.task,
            date: req.date,
            status: req.status,
        },
    )
    .await?;

    tracing::debug!(task_id = %id, "Task registered");
    Ok(Json(CreateTaskResponse {
        message: "Task registered",
        id,
    }))
}

/// Lists the tasks whose `userName` equals the header identity
///
/// ```text
/// GET /tasks
/// Authorization: Bearer alice
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No identity in the header
pub async fn list_tasks(
    State(state): State<AppState>,
    HeaderIdentity(owner): HeaderIdentity,
) -> ApiResult<Json<Vec<Record<Task>>>> {
    let tasks = Task::list_by_owner(state.store(), &owner).await?;
    Ok(Json(tasks))
}

/// Deletes a personal task
///
/// # Errors
///
/// - `400 Bad Request`: Empty id
/// - `404 Not Found`: No task with this id
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    if id.is_empty() {
        return Err(ApiError::validation("Task id is required"));
    }

    if !Task::delete(state.store(), &id).await? {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::debug!(task_id = %id, "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Overwrites `task`, `date` and `status` of a personal task
///
/// # Errors
///
/// - `400 Bad Request`: Any field missing; nothing is written
/// - `404 Not Found`: No task with this id
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate(&req, "task, date and status are required")?;

    Task::update(
        state.store(),
        &id,
        UpdateTask {
            task: req.task,
            date: req.date,
            status: req.status,
        },
    )
    .await?;

    Ok(Json(MessageResponse::new("Task updated")))
}
