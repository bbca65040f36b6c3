/// Registration and login endpoints
///
/// # Endpoints
///
/// - `POST /registro` - Register new user
/// - `POST /login` - Check credentials and return the stored identity
///
/// Login is stateless: no session or token is issued, and the client keeps
/// the returned `userName`/`grupo` for later requests.

use super::{validate, MessageResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::password,
    models::user::{CreateUser, Role, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userName is required"))]
    pub user_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub user_name: String,
    pub rol: Role,
    pub grupo: Option<String>,
}

const DUPLICATE_USER: &str = "User or email already exists";

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /registro
/// Content-Type: application/json
///
/// { "userName": "alice", "email": "alice@example.com", "password": "..." }
/// ```
///
/// Both uniqueness lookups run concurrently before the write. The write is
/// keyed by email and conditional, so a concurrent registration of the same
/// email cannot overwrite the first; two registrations racing on the same
/// `userName` with different emails can both succeed.
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or user name / email already taken
/// - `500 Internal Server Error`: Store or hashing failure
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate(&req, "userName, email and password are required")?;

    let store = state.store();
    let (name_taken, email_taken) = tokio::try_join!(
        User::user_name_taken(store, &req.user_name),
        User::email_taken(store, &req.email),
    )?;

    if name_taken || email_taken {
        tracing::info!(user_name = %req.user_name, "Registration rejected: duplicate user");
        return Err(ApiError::Conflict(DUPLICATE_USER.to_string()));
    }

    let plaintext = req.password;
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;

    User::create(
        store,
        CreateUser {
            user_name: req.user_name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!("User registered");
    Ok(Json(MessageResponse::new("Registration successful")))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "email": "alice@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Login successful", "userName": "alice", "rol": "usuario", "grupo": null }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field
/// - `404 Not Found`: No user with this email
/// - `401 Unauthorized`: Wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    validate(&req, "email and password are required")?;

    let user = User::find_by_email(state.store(), &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let stored_hash = user.password_hash.clone();
    let plaintext = req.password;
    let valid =
        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
            .await??;

    if !valid {
        tracing::warn!(user_name = %user.user_name, "Login failed: wrong password");
        return Err(ApiError::Unauthorized("Incorrect password".to_string()));
    }

    Ok(Json(LoginResponse {
        message: "Login successful",
        user_name: user.user_name,
        rol: user.rol,
        grupo: user.grupo,
    }))
}
