//! User management use cases.

use std::sync::Arc;

use tracing::info;

use crate::domain::booking_support::map_user_repo_error;
use crate::domain::ports::UserRepository;
use crate::domain::{Error, NewUser, User, UserId, UserUpdate};

/// User management service.
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new user service over the given store.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    /// Register a new user. Emails are unique across users.
    pub async fn create(&self, new_user: NewUser) -> Result<User, Error> {
        self.ensure_email_free(&new_user.email).await?;
        let user = self
            .users
            .create(new_user)
            .await
            .map_err(map_user_repo_error)?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Apply a partial update; an email change re-checks uniqueness.
    pub async fn update(&self, user_id: UserId, update: UserUpdate) -> Result<User, Error> {
        let mut user = self.get_by_id(user_id).await?;

        if let Some(email) = update.email {
            if email != user.email {
                self.ensure_email_free(&email).await?;
                user.email = email;
            }
        }
        if let Some(name) = update.name {
            user.name = name;
        }

        self.users
            .update(&user)
            .await
            .map_err(map_user_repo_error)?;
        info!(user_id = %user_id, "user updated");
        Ok(user)
    }

    /// Fetch a user by identifier.
    pub async fn get_by_id(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    /// List every registered user.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_user_repo_error)
    }

    /// Remove a user.
    pub async fn delete(&self, user_id: UserId) -> Result<(), Error> {
        // Resolve first so a missing user surfaces as NotFound.
        let user = self.get_by_id(user_id).await?;
        self.users
            .delete(user.id)
            .await
            .map_err(map_user_repo_error)?;
        info!(user_id = %user_id, "user deleted");
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_repo_error)?;
        match existing {
            Some(_) => Err(Error::conflict(format!(
                "user with email {email} already exists"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
