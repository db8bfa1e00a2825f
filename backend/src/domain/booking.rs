//! Booking aggregate and the temporal/status classification of bookings.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{BookingId, ItemId, UserId};
use super::item::Item;
use super::user::User;

/// Approval status of a booking.
///
/// A booking starts at `Waiting` and moves exactly once to `Approved` or
/// `Rejected` by the item owner. Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// A time-bounded reservation of an item by a user.
///
/// ## Invariants
/// - `end` is strictly after `start`, enforced at creation.
/// - `status` transitions only `Waiting -> {Approved, Rejected}`, once.
/// - `id`, `item_id`, `booker_id`, `start`, `end`, and `created` are
///   immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub created: DateTime<Utc>,
}

impl Booking {
    /// Ordering used by every booking listing: `start` descending, ties
    /// broken by `id` descending so result sets are deterministic.
    pub fn by_start_desc(a: &Self, b: &Self) -> Ordering {
        b.start.cmp(&a.start).then(b.id.cmp(&a.id))
    }
}

/// A booking joined with its booker and item records for presentation.
///
/// The joins are read-only: the booking core never mutates the referenced
/// user or item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub booker: User,
    pub item: Item,
}

/// Payload for persisting a new booking; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub created: DateTime<Utc>,
}

/// Classification bucket used when listing bookings.
///
/// `All`, `Current`, `Past`, and `Future` partition by time against a caller
/// supplied `now`; `Waiting` and `Rejected` filter on [`BookingStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStateFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingStateFilter {
    /// Whether `booking` falls in this bucket at the instant `now`.
    ///
    /// The rule is a pure function of `(filter, now)` so the requester and
    /// owner views classify identically:
    /// `Current: start <= now <= end`, `Past: end < now`,
    /// `Future: start > now`, `Waiting`/`Rejected` by status.
    pub fn matches(self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.start <= now && now <= booking.end,
            Self::Past => booking.end < now,
            Self::Future => booking.start > now,
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Error raised for a state token outside the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state: {token}")]
pub struct UnknownStateError {
    pub token: String,
}

impl FromStr for BookingStateFilter {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownStateError {
                token: s.to_owned(),
            }),
        }
    }
}
