/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: bcrypt password hashing and verification
/// - [`identity`]: caller identity from the `Authorization` header
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod password;
