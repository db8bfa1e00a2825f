//! Booking query engine.
//!
//! Classifies bookings into the six state buckets for the requester view and
//! the owner view, against a single `now` taken from the injected clock at
//! call time. Both views share one pipeline: filter with the pure
//! [`BookingStateFilter::matches`] predicate, order `start` descending with
//! an id tiebreaker, then window with the validated [`PageRequest`].

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::booking_support::{
    join_page, map_booking_repo_error, map_item_repo_error, map_user_repo_error,
};
use crate::domain::ports::{BookingRepository, ItemRepository, UserRepository};
use crate::domain::{
    Booking, BookingDetails, BookingStateFilter, Error, ItemId, PageRequest, UserId,
};

/// Booking query service.
pub struct BookingQueryService<B, U, I> {
    bookings: Arc<B>,
    users: Arc<U>,
    items: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<B, U, I> Clone for BookingQueryService<B, U, I> {
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            users: Arc::clone(&self.users),
            items: Arc::clone(&self.items),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, U, I> BookingQueryService<B, U, I>
where
    B: BookingRepository,
    U: UserRepository,
    I: ItemRepository,
{
    /// Create a new query service over the given stores and clock.
    pub fn new(bookings: Arc<B>, users: Arc<U>, items: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            users,
            items,
            clock,
        }
    }

    /// Bookings placed by `caller`, filtered by `state`.
    pub async fn for_requester(
        &self,
        caller: UserId,
        state: &str,
        page: PageRequest,
    ) -> Result<Vec<BookingDetails>, Error> {
        self.ensure_user_exists(caller).await?;
        let filter = parse_state(state)?;

        let bookings = self
            .bookings
            .list_by_booker(caller)
            .await
            .map_err(map_booking_repo_error)?;

        info!(booker_id = %caller, state = %state, "listing requester bookings");
        self.classify_and_join(bookings, filter, page).await
    }

    /// Bookings against items owned by `caller`, filtered by `state`.
    ///
    /// A caller who owns no items has no owner view at all, which surfaces
    /// as `NotFound` rather than an empty list.
    pub async fn for_owner(
        &self,
        caller: UserId,
        state: &str,
        page: PageRequest,
    ) -> Result<Vec<BookingDetails>, Error> {
        self.ensure_user_exists(caller).await?;

        let owned = self
            .items
            .list_by_owner(caller)
            .await
            .map_err(map_item_repo_error)?;
        if owned.is_empty() {
            return Err(Error::not_found(format!(
                "user {caller} is not an owner of any items"
            )));
        }
        let filter = parse_state(state)?;

        let item_ids: Vec<ItemId> = owned.iter().map(|item| item.id).collect();
        let bookings = self
            .bookings
            .list_by_items(&item_ids)
            .await
            .map_err(map_booking_repo_error)?;

        info!(owner_id = %caller, state = %state, "listing owner bookings");
        self.classify_and_join(bookings, filter, page).await
    }

    async fn classify_and_join(
        &self,
        mut bookings: Vec<Booking>,
        filter: BookingStateFilter,
        page: PageRequest,
    ) -> Result<Vec<BookingDetails>, Error> {
        // One snapshot of "now" classifies the whole result set.
        let now = self.clock.utc();
        bookings.retain(|booking| filter.matches(booking, now));
        bookings.sort_by(Booking::by_start_desc);
        let windowed = page.slice(bookings);
        join_page(self.users.as_ref(), self.items.as_ref(), windowed).await
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
}

fn parse_state(state: &str) -> Result<BookingStateFilter, Error> {
    state
        .parse()
        .map_err(|err: crate::domain::UnknownStateError| Error::invalid_request(err.to_string()))
}

#[cfg(test)]
#[path = "booking_query_service_tests.rs"]
mod tests;
