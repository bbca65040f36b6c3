/// Password hashing module using bcrypt
///
/// Hashes are standard `$2b$` strings with the salt and cost embedded, so
/// verification needs nothing but the stored hash.
///
/// # Security
///
/// - **Algorithm**: bcrypt
/// - **Cost**: 10 (2^10 key-expansion rounds)
/// - **Salt**: 16 random bytes per hash
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

/// Work factor applied to every new hash
pub const HASH_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Stored hash is not a valid bcrypt string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password with a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, HASH_COST).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored hash
///
/// Returns `Ok(false)` on mismatch. Errors are reserved for hashes that
/// cannot be parsed at all.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_embeds_cost() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$2"));
        assert_eq!(&hash[4..6], "10");
        assert!(!hash.contains("test_password_123"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        assert!(verify_password("correct_password", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_rejects_single_character_mutations() {
        let password = "hunter42";
        let hash = hash_password(password).expect("Hash should succeed");

        for i in 0..password.len() {
            let mut mutated: Vec<char> = password.chars().collect();
            mutated[i] = if mutated[i] == 'x' { 'y' } else { 'x' };
            let mutated: String = mutated.into_iter().collect();

            assert!(
                !verify_password(&mutated, &hash).expect("Verify should succeed"),
                "Mutation '{}' should not verify",
                mutated
            );
        }

        assert!(!verify_password("hunter4", &hash).unwrap());
        assert!(!verify_password("hunter421", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password").expect("Hash should succeed");
        assert!(!verify_password("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "invalid_hash").is_err());
    }

    #[test]
    fn test_hash_verify_roundtrip_unicode() {
        let password = "unicode-密码-パスワード";
        let hash = hash_password(password).expect("Hash should succeed");
        assert!(verify_password(password, &hash).unwrap());
    }
}
