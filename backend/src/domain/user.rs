//! User aggregate.

use serde::Serialize;

use super::ids::UserId;

/// A registered user of the sharing service.
///
/// Email addresses are unique across users; the uniqueness check lives in
/// [`crate::domain::UserService`] so every adapter enforces it the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Payload for creating a user; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update applied to an existing user. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
