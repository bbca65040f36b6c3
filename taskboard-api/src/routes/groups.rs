/// Group endpoints
///
/// - `POST /groups` - Create a group
/// - `GET /groups` - All groups, unpaginated

use super::{validate, MessageResponse};
use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, Json};
use serde::Deserialize;
use taskboard_shared::{db::Record, models::group::Group};
use validator::Validate;

/// Create group request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "groupName is required"))]
    pub group_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "createdBy is required"))]
    pub created_by: String,
}

pub async fn create_group(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateGroupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate(&req, "groupName and createdBy are required")?;

    let id = Group::create(
        state.store(),
        &Group {
            group_name: req.group_name,
            created_by: req.created_by,
        },
    )
    .await?;

    tracing::info!(group_id = %id, "Group created");
    Ok(Json(MessageResponse::new("Group created")))
}

pub async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<Record<Group>>>> {
    Ok(Json(Group::list(state.store()).await?))
}
