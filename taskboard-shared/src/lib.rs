//! # Taskboard Shared Library
//!
//! Persistence, credentials and domain models used by the Taskboard API.
//!
//! ## Module Organization
//!
//! - `db`: Document store trait and its in-memory and PostgreSQL backends
//! - `auth`: Password hashing and caller identity
//! - `models`: Users, tasks, assigned tasks and groups

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
