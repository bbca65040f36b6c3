/// User model and store operations
///
/// Users are keyed by email in the `users` collection. `userName` is unique
/// too, but only because registration checks it before writing; the store
/// does not enforce it.
///
/// # Document shape
///
/// ```json
/// {
///   "userName": "alice",
///   "email": "alice@example.com",
///   "password": "$2b$10$...",
///   "rol": "usuario",
///   "grupo": "g-123"
/// }
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::memory::MemoryStore;
/// use taskboard_shared::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), taskboard_shared::db::StoreError> {
/// let store = MemoryStore::new();
///
/// User::create(&store, CreateUser {
///     user_name: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$2b$10$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&store, "alice@example.com").await?;
/// # Ok(())
/// # }
/// ```

use crate::db::{into_records, to_object, Collection, DocumentStore, Record, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Authorization tier of a user
///
/// Stored and validated only; nothing in the API enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator
    Admin,

    /// Group leader
    Lider,

    /// Regular user; every account starts here
    #[default]
    Usuario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Lider => "lider",
            Role::Usuario => "usuario",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings that are not one of the three roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "lider" => Ok(Role::Lider),
            "usuario" => Ok(Role::Usuario),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

/// User document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique display name
    pub user_name: String,

    /// Email address, also the document key
    pub email: String,

    /// bcrypt hash of the password; never the plaintext
    #[serde(rename = "password")]
    pub password_hash: String,

    #[serde(default)]
    pub rol: Role,

    /// Group id, absent until assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grupo: Option<String>,
}

/// User as returned by listing endpoints: everything but the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_name: String,
    pub email: String,
    pub rol: Role,
    pub grupo: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_name: user.user_name,
            email: user.email,
            rol: user.rol,
            grupo: user.grupo,
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,

    /// bcrypt hash (NOT the plaintext password)
    pub password_hash: String,
}

fn profiles(records: Vec<Record<User>>) -> Vec<Record<UserProfile>> {
    records
        .into_iter()
        .map(|r| Record {
            id: r.id,
            data: r.data.into(),
        })
        .collect()
}

fn single_field(field: &str, value: Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(field.to_string(), value);
    fields
}

impl User {
    /// Writes a new user keyed by email, with role `usuario` and no group
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if a user with this email is
    /// already stored.
    pub async fn create(store: &dyn DocumentStore, data: CreateUser) -> StoreResult<Self> {
        let user = User {
            user_name: data.user_name,
            email: data.email,
            password_hash: data.password_hash,
            rol: Role::default(),
            grupo: None,
        };

        store
            .create(Collection::Users, &user.email, to_object(&user)?)
            .await?;

        Ok(user)
    }

    /// Point read by document key (the email)
    pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> StoreResult<Option<Self>> {
        match store.get(Collection::Users, email).await? {
            Some(doc) => Ok(Some(doc.into_record::<User>()?.data)),
            None => Ok(None),
        }
    }

    /// Whether any stored user has this `userName`
    pub async fn user_name_taken(store: &dyn DocumentStore, user_name: &str) -> StoreResult<bool> {
        let docs = store.find_eq(Collection::Users, "userName", user_name).await?;
        Ok(!docs.is_empty())
    }

    /// Whether any stored user has this `email` field
    ///
    /// Queries the field rather than the key, so documents written under a
    /// different key are caught as well.
    pub async fn email_taken(store: &dyn DocumentStore, email: &str) -> StoreResult<bool> {
        let docs = store.find_eq(Collection::Users, "email", email).await?;
        Ok(!docs.is_empty())
    }

    /// Every user, without password hashes
    pub async fn list(store: &dyn DocumentStore) -> StoreResult<Vec<Record<UserProfile>>> {
        let docs = store.scan(Collection::Users).await?;
        Ok(profiles(into_records(docs)?))
    }

    /// Users whose `grupo` equals `group_id`, without password hashes
    pub async fn list_by_group(
        store: &dyn DocumentStore,
        group_id: &str,
    ) -> StoreResult<Vec<Record<UserProfile>>> {
        let docs = store.find_eq(Collection::Users, "grupo", group_id).await?;
        Ok(profiles(into_records(docs)?))
    }

    /// Overwrites the role of the user stored under `user_id`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no such user.
    pub async fn set_role(store: &dyn DocumentStore, user_id: &str, rol: Role) -> StoreResult<()> {
        store
            .update(Collection::Users, user_id, single_field("rol", json!(rol)))
            .await
    }

    /// Overwrites the group of the user stored under `user_id`
    ///
    /// `None` clears the assignment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no such user.
    pub async fn set_group(
        store: &dyn DocumentStore,
        user_id: &str,
        grupo: Option<&str>,
    ) -> StoreResult<()> {
        store
            .update(Collection::Users, user_id, single_field("grupo", json!(grupo)))
            .await
    }
}
