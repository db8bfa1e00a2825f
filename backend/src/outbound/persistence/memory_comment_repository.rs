//! In-memory [`CommentRepository`] adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, ItemId, NewComment};

/// Map-backed comment store.
#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    rows: RwLock<HashMap<i64, Comment>>,
    sequence: AtomicI64,
}

impl MemoryCommentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> CommentId {
        CommentId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<i64, Comment>>, CommentRepositoryError> {
        self.rows
            .read()
            .map_err(|_| CommentRepositoryError::query("comment store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i64, Comment>>, CommentRepositoryError> {
        self.rows
            .write()
            .map_err(|_| CommentRepositoryError::query("comment store lock poisoned"))
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, CommentRepositoryError> {
        let comment = Comment {
            id: self.next_id(),
            item_id: new_comment.item_id,
            author_id: new_comment.author_id,
            text: new_comment.text,
            created: new_comment.created,
        };
        self.write()?.insert(comment.id.value(), comment.clone());
        Ok(comment)
    }

    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut comments: Vec<Comment> = self
            .read()?
            .values()
            .filter(|comment| comment.item_id == item_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created, comment.id));
        Ok(comments)
    }
}
