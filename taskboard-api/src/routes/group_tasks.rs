/// Group task endpoints
///
/// # Endpoints
///
/// - `POST /assignedTask` - Assign a task within a group
/// - `GET /groupTasks` - Tasks of the group named in the `Authorization` header
/// - `PUT /updateTaskStatus/:taskId` - Change a task's status

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
    models::assigned_task::{AssignedTask, CreateAssignedTask},
};
use validator::Validate;

/// Assign task request; every field is required
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "groupId is required"))]
    pub group_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "assignedTo is required"))]
    pub assigned_to: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "taskName is required"))]
    pub task_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "dueDate is required"))]
    pub due_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "createdBy is required"))]
    pub created_by: String,
}

/// Assign task response
#[derive(Debug, Serialize)]
pub struct AssignTaskResponse {
    pub message: &'static str,
    pub task: Record<AssignedTask>,
}

/// Update status request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Assigns a task; the response echoes the stored task with its id and
/// server-assigned `createdAt`
///
/// # Errors
///
/// - `400 Bad Request`: Any field missing
pub async fn assign_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AssignTaskRequest>,
) -> ApiResult<Json<AssignTaskResponse>> {
    validate(&req, "All fields are required")?;

    let task = AssignedTask::create(
        state.store(),
        CreateAssignedTask {
            group_id: req.group_id,
            assigned_to: req.assigned_to,
            task_name: req.task_name,
            due_date: req.due_date,
            status: req.status,
            created_by: req.created_by,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, group_id = %task.data.group_id, "Task assigned");
    Ok(Json(AssignTaskResponse {
        message: "Task assigned",
        task,
    }))
}

/// Lists the tasks whose `groupId` equals the header identity
///
/// ```text
/// GET /groupTasks
/// Authorization: Bearer <groupId>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No group id in the header
pub async fn list_group_tasks(
    State(state): State<AppState>,
    HeaderIdentity(group_id): HeaderIdentity,
) -> ApiResult<Json<Vec<Record<AssignedTask>>>> {
    Ok(Json(AssignedTask::list_by_group(state.store(), &group_id).await?))
}

/// Sets the status of an assigned task
///
/// # Errors
///
/// - `400 Bad Request`: Empty status; nothing is written
/// - `404 Not Found`: No task with this id
pub async fn update_task_status(
    State(state): State<AppState>,
    ApiPath(task_id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.status.is_empty() {
        return Err(ApiError::validation("status is required"));
    }

    AssignedTask::update_status(state.store(), &task_id, &req.status).await?;

    Ok(Json(MessageResponse::new("Status updated")))
}
