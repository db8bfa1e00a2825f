//! Persistence port for user records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewUser, User, UserId};

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned identifier.
    async fn create(&self, new_user: NewUser) -> Result<User, UserRepositoryError>;

    /// Overwrite an existing user record.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Whether a user with this identifier exists.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError>;

    /// Fetch a user by email, used for uniqueness checks.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// All users, ordered by identifier ascending.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Remove a user record.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
