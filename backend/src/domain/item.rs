//! Item aggregate.

use serde::Serialize;

use super::ids::{ItemId, RequestId, UserId};

/// A shareable item listed by its owner.
///
/// `available` gates new bookings; an unavailable item can still appear in
/// listings and keeps its booking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    /// Set when the item was listed in answer to an item request.
    pub request_id: Option<RequestId>,
}

/// Payload for listing a new item; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    pub request_id: Option<RequestId>,
}

/// Partial update applied to an existing item. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub request_id: Option<RequestId>,
}
