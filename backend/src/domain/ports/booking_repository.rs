//! Persistence port for bookings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{Booking, BookingId, BookingStatus, ItemId, NewBooking, UserId};

/// Persistence errors raised by [`BookingRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRepositoryError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query { message: String },
}

impl BookingRepositoryError {
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

/// Outcome of the compare-and-set status transition.
///
/// The store applies `Waiting -> next` only if the booking is still waiting
/// at the moment of the write, so two concurrent decisions cannot both
/// succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTransition {
    /// The transition was applied; carries the updated booking.
    Applied(Booking),
    /// The booking had already left `Waiting`; carries the current status.
    AlreadyDecided(BookingStatus),
}

/// Persistence port for booking aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking and return it with its assigned identifier.
    async fn create(&self, new_booking: NewBooking) -> Result<Booking, BookingRepositoryError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Atomically move a waiting booking to `next`. `None` when no booking
    /// with this identifier exists.
    async fn transition_from_waiting(
        &self,
        id: BookingId,
        next: BookingStatus,
    ) -> Result<Option<StatusTransition>, BookingRepositoryError>;

    /// Every booking placed by `booker_id`, in no particular order.
    async fn list_by_booker(&self, booker_id: UserId)
        -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Every booking against any of the given items, in no particular order.
    async fn list_by_items(&self, item_ids: &[ItemId])
        -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Every booking against one item, used for listing enrichment.
    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Whether `booker_id` has a booking of `item_id` that ended before
    /// `before`. Gates comment creation.
    async fn exists_finished(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        before: DateTime<Utc>,
    ) -> Result<bool, BookingRepositoryError>;
}
