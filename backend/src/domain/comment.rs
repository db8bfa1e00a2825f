//! Comments left on items after completed bookings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{CommentId, ItemId, UserId};

/// A comment a booker leaves on an item once their booking has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Payload for persisting a new comment; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub item_id: ItemId,
    pub author_id: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// A comment joined with its author's display name for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub author_name: String,
}
