/// User management endpoints
///
/// # Endpoints
///
/// - `GET /users` - All users
/// - `PUT /users/:userId` - Change role
/// - `PUT /groupChange/:userId` - Change group
/// - `GET /usersByGroup?groupId=` - Users in a group
///
/// `userId` is the user's document key, i.e. the email. Role and group
/// changes fail with 404 when no user is stored under that key.

use super::{validate, MessageResponse};
use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use taskboard_shared::{
    db::Record,
    models::user::{Role, User, UserProfile},
};
use validator::Validate;

/// Change role request
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub rol: String,
}

/// Change group request; a missing or null `grupo` clears the assignment
#[derive(Debug, Deserialize)]
pub struct ChangeGroupRequest {
    pub grupo: Option<String>,
}

/// Query for `GET /usersByGroup`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UsersByGroupQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "groupId is required"))]
    pub group_id: String,
}

/// Lists every user without password hashes
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<Record<UserProfile>>>> {
    Ok(Json(User::list(state.store()).await?))
}

/// Sets the role of a user
///
/// The role is checked before anything is written.
///
/// # Errors
///
/// - `400 Bad Request`: Role is not `admin`, `lider` or `usuario`
/// - `404 Not Found`: No such user
pub async fn change_role(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(req): ApiJson<ChangeRoleRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let rol: Role = req.rol.parse()?;

    User::set_role(state.store(), &user_id, rol).await?;

    tracing::info!(user_id = %user_id, rol = %rol, "Role updated");
    Ok(Json(MessageResponse::new("Role updated")))
}

/// Sets or clears the group of a user
///
/// The group id is not checked against existing groups.
///
/// # Errors
///
/// - `404 Not Found`: No such user
pub async fn change_group(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(req): ApiJson<ChangeGroupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    User::set_group(state.store(), &user_id, req.grupo.as_deref()).await?;

    tracing::info!(user_id = %user_id, grupo = ?req.grupo, "Group updated");
    Ok(Json(MessageResponse::new("Group updated")))
}

/// Lists the users whose `grupo` equals `groupId`
///
/// # Errors
///
/// - `400 Bad Request`: Missing `groupId`
pub async fn list_users_by_group(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UsersByGroupQuery>,
) -> ApiResult<Json<Vec<Record<UserProfile>>>> {
    validate(&query, "groupId is required")?;

    Ok(Json(User::list_by_group(state.store(), &query.group_id).await?))
}
