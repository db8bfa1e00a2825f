//! Persistence port for item requests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ItemRequest, NewRequest, RequestId, UserId};

/// Persistence errors raised by [`RequestRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestRepositoryError {
    /// Repository connection could not be established.
    #[error("request repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("request repository query failed: {message}")]
    Query { message: String },
}

impl RequestRepositoryError {
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

/// Persistence port for item request aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Persist a new request and return it with its assigned identifier.
    async fn create(&self, new_request: NewRequest)
        -> Result<ItemRequest, RequestRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ItemRequest>, RequestRepositoryError>;

    /// Requests placed by `requester_id`, ordered by creation descending.
    async fn list_by_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<ItemRequest>, RequestRepositoryError>;

    /// Requests placed by anyone else, ordered by creation descending.
    async fn list_excluding_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<ItemRequest>, RequestRepositoryError>;
}
