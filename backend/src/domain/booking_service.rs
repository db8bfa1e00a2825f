//! Booking lifecycle engine.
//!
//! Creates bookings after validating the requester and the requested item,
//! applies the single `WAITING -> {APPROVED, REJECTED}` status transition on
//! behalf of the item owner, and answers point reads with access control.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::booking_support::{
    join_one, map_booking_repo_error, map_item_repo_error, map_user_repo_error,
};
use crate::domain::ports::{BookingRepository, ItemRepository, StatusTransition, UserRepository};
use crate::domain::{
    Booking, BookingDetails, BookingId, BookingStatus, Error, Item, ItemId, NewBooking, User,
    UserId,
};

/// Creation payload accepted by [`BookingService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPayload {
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Booking lifecycle service.
pub struct BookingService<B, U, I> {
    bookings: Arc<B>,
    users: Arc<U>,
    items: Arc<I>,
    clock: Arc<dyn Clock>,
}

// Derived Clone would require the stores to be Clone; only the Arcs are.
impl<B, U, I> Clone for BookingService<B, U, I> {
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            users: Arc::clone(&self.users),
            items: Arc::clone(&self.items),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, U, I> BookingService<B, U, I>
where
    B: BookingRepository,
    U: UserRepository,
    I: ItemRepository,
{
    /// Create a new lifecycle service over the given stores and clock.
    pub fn new(bookings: Arc<B>, users: Arc<U>, items: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            users,
            items,
            clock,
        }
    }

    /// Place a new booking request for `caller`.
    ///
    /// Preconditions, first failure wins: caller exists, item exists, item
    /// is available, caller is not the owner, `end` strictly after `start`.
    /// On success the booking is persisted once with status `WAITING`.
    pub async fn create(
        &self,
        caller: UserId,
        payload: BookingPayload,
    ) -> Result<BookingDetails, Error> {
        let booker = self.find_user(caller).await?;
        let item = self.find_item(payload.item_id).await?;

        if !item.available {
            return Err(Error::invalid_request(format!(
                "item {} is not available for booking",
                item.id
            )));
        }
        if item.owner_id == caller {
            return Err(Error::forbidden("owner cannot book own item"));
        }
        if payload.end <= payload.start {
            return Err(Error::invalid_request(
                "booking end must be strictly after its start",
            ));
        }

        let booking = self
            .bookings
            .create(NewBooking {
                item_id: item.id,
                booker_id: booker.id,
                start: payload.start,
                end: payload.end,
                status: BookingStatus::Waiting,
                created: self.clock.utc(),
            })
            .await
            .map_err(map_booking_repo_error)?;

        info!(booking_id = %booking.id, item_id = %item.id, booker_id = %caller, "booking created");
        Ok(BookingDetails {
            booking,
            booker,
            item,
        })
    }

    /// Approve or reject a waiting booking on behalf of the item owner.
    ///
    /// The transition is applied as a compare-and-set in the store, so of
    /// two concurrent decisions exactly one succeeds; the loser observes the
    /// decided status and fails like any late call.
    pub async fn decide(
        &self,
        caller: UserId,
        booking_id: BookingId,
        approved: bool,
    ) -> Result<BookingDetails, Error> {
        let booking = self.find_booking(booking_id).await?;
        let item = self.find_joined_item(&booking).await?;

        if item.owner_id != caller {
            return Err(Error::forbidden("only the owner may decide a booking"));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(already_decided(booking_id));
        }

        let next = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let transition = self
            .bookings
            .transition_from_waiting(booking_id, next)
            .await
            .map_err(map_booking_repo_error)?
            .ok_or_else(|| booking_not_found(booking_id))?;

        let booking = match transition {
            StatusTransition::Applied(booking) => booking,
            // Lost the race against a concurrent decision.
            StatusTransition::AlreadyDecided(_) => return Err(already_decided(booking_id)),
        };

        info!(booking_id = %booking_id, status = %booking.status, "booking decided");
        join_one(self.users.as_ref(), self.items.as_ref(), booking).await
    }

    /// Fetch a booking visible to `caller` (the booker or the item owner).
    pub async fn get_by_id(
        &self,
        caller: UserId,
        booking_id: BookingId,
    ) -> Result<BookingDetails, Error> {
        self.ensure_user_exists(caller).await?;
        let booking = self.find_booking(booking_id).await?;
        let item = self.find_joined_item(&booking).await?;

        let has_access = booking.booker_id == caller || item.owner_id == caller;
        if !has_access {
            return Err(Error::forbidden(format!(
                "no access to booking {booking_id}"
            )));
        }

        join_one(self.users.as_ref(), self.items.as_ref(), booking).await
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn ensure_user_exists(&self, id: UserId) -> Result<(), Error> {
        let exists = self
            .users
            .exists_by_id(id)
            .await
            .map_err(map_user_repo_error)?;
        if exists {
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }

    async fn find_item(&self, id: ItemId) -> Result<Item, Error> {
        self.items
            .find_by_id(id)
            .await
            .map_err(map_item_repo_error)?
            .ok_or_else(|| Error::not_found(format!("item {id} not found")))
    }

    /// The item a booking references; missing rows are an internal fault.
    async fn find_joined_item(&self, booking: &Booking) -> Result<Item, Error> {
        self.items
            .find_by_id(booking.item_id)
            .await
            .map_err(map_item_repo_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "item {} missing for booking {}",
                    booking.item_id, booking.id
                ))
            })
    }

    async fn find_booking(&self, id: BookingId) -> Result<Booking, Error> {
        self.bookings
            .find_by_id(id)
            .await
            .map_err(map_booking_repo_error)?
            .ok_or_else(|| booking_not_found(id))
    }
}

fn booking_not_found(id: BookingId) -> Error {
    Error::not_found(format!("booking {id} not found"))
}

/// The terminal-state guard is part of the access-control taxonomy: once an
/// owner has decided, nobody is permitted to change the status again.
fn already_decided(id: BookingId) -> Error {
    Error::forbidden(format!("booking {id} already decided"))
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
