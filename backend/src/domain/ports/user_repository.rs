//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserPatch};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// The store's unique constraint on `email` rejected the write. This is
    /// the backstop for two simultaneous writes racing the application-level
    /// uniqueness check.
    #[error("email is already in use")]
    DuplicateEmail,
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// CRUD access to the users table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, newest `created_at` first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserPersistenceError>;

    /// True when `email` belongs to a user other than `exclude`.
    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<i32>,
    ) -> Result<bool, UserPersistenceError>;

    /// Persist a new user, assigning its id and timestamps.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Apply a partial update and refresh `updated_at`. Returns `None` when
    /// no user with `id` exists.
    async fn update(&self, id: i32, patch: &UserPatch)
    -> Result<Option<User>, UserPersistenceError>;

    /// Delete a user together with all orders it owns, atomically. Returns
    /// `false` when no user with `id` exists.
    async fn delete(&self, id: i32) -> Result<bool, UserPersistenceError>;
}
