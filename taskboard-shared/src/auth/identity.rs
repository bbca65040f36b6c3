/// Caller identity taken from the `Authorization` header
///
/// Clients send `Authorization: <scheme> <value>` where `<value>` is a user
/// name (for task listings) or a group id (for group task listings). The
/// value is NOT verified: whoever sends a name is treated as that user.
/// Everything that depends on this lives behind [`identity_from_header`] so a
/// verified session identity can replace it without touching the handlers.

/// Error type for identity extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// Header absent, or no value after the scheme
    #[error("Missing caller identity")]
    Missing,
}

/// Returns the second space-separated token of an `Authorization` value
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::identity::{identity_from_header, IdentityError};
///
/// assert_eq!(identity_from_header(Some("Bearer alice")), Ok("alice"));
/// assert_eq!(identity_from_header(Some("Bearer")), Err(IdentityError::Missing));
/// assert_eq!(identity_from_header(None), Err(IdentityError::Missing));
/// ```
pub fn identity_from_header(value: Option<&str>) -> Result<&str, IdentityError> {
    value
        .and_then(|v| v.split(' ').nth(1))
        .filter(|identity| !identity.is_empty())
        .ok_or(IdentityError::Missing)
}
