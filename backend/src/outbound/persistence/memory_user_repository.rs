//! In-memory [`UserRepository`] adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId};

/// Map-backed user store.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    rows: RwLock<HashMap<i64, User>>,
    sequence: AtomicI64,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> UserId {
        UserId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<i64, User>>, UserRepositoryError> {
        self.rows
            .read()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i64, User>>, UserRepositoryError> {
        self.rows
            .write()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserRepositoryError> {
        let user = User {
            id: self.next_id(),
            name: new_user.name,
            email: new_user.email,
        };
        self.write()?.insert(user.id.value(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut rows = self.write()?;
        match rows.get_mut(&user.id.value()) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(UserRepositoryError::query(format!(
                "user {} does not exist",
                user.id
            ))),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.read()?.get(&id.value()).cloned())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        Ok(self.read()?.contains_key(&id.value()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .read()?
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self.read()?.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.write()?.remove(&id.value());
        Ok(())
    }
}
