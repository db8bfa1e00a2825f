//! Item requests: "looking for" posts that owners can answer with items.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{RequestId, UserId};
use super::item::Item;

/// A request for an item that is not yet listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRequest {
    pub id: RequestId,
    pub description: String,
    pub requester_id: UserId,
    pub created: DateTime<Utc>,
}

/// Payload for persisting a new request; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub description: String,
    pub requester_id: UserId,
    pub created: DateTime<Utc>,
}

/// A request joined with the items listed in answer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    pub request: ItemRequest,
    pub items: Vec<Item>,
}
