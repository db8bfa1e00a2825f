//! Persistence port for comments.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Comment, ItemId, NewComment};

/// Persistence errors raised by [`CommentRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentRepositoryError {
    /// Repository connection could not be established.
    #[error("comment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("comment repository query failed: {message}")]
    Query { message: String },
}

impl CommentRepositoryError {
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

/// Persistence port for comment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment and return it with its assigned identifier.
    async fn create(&self, new_comment: NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Comments on one item, ordered by creation ascending.
    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>, CommentRepositoryError>;
}
