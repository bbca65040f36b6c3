/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `tasks`: Personal tasks
/// - `users`: User listing, role and group changes
/// - `groups`: Group creation and listing
/// - `group_tasks`: Tasks assigned within a group

pub mod auth;
pub mod group_tasks;
pub mod groups;
pub mod health;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use validator::Validate;

/// Response carrying only a confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Runs `validator` checks, reporting failures under `message`
pub(crate) fn validate<T: Validate>(req: &T, message: &str) -> ApiResult<()> {
    req.validate()
        .map_err(|e| ApiError::from_validation(message, &e))
}
