//! Persistence port for item records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Item, ItemId, ItemUpdate, NewItem, RequestId, UserId};

/// Persistence errors raised by [`ItemRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemRepositoryError {
    /// Repository connection could not be established.
    #[error("item repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("item repository query failed: {message}")]
    Query { message: String },
}

impl ItemRepositoryError {
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

/// Persistence port for item aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item and return it with its assigned identifier.
    async fn create(&self, new_item: NewItem) -> Result<Item, ItemRepositoryError>;

    /// Apply a partial update to an existing item and return the result.
    /// `None` when the item does not exist.
    async fn update(
        &self,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Option<Item>, ItemRepositoryError>;

    /// Fetch an item by identifier.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    /// Remove an item record.
    async fn delete(&self, id: ItemId) -> Result<(), ItemRepositoryError>;

    /// Items owned by `owner_id`, ordered by identifier descending.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Available items whose name or description contains `text`
    /// case-insensitively, ordered by identifier descending.
    async fn search(&self, text: &str) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Items listed in answer to any of the given requests.
    async fn list_by_request_ids(
        &self,
        request_ids: &[RequestId],
    ) -> Result<Vec<Item>, ItemRepositoryError>;
}
