//! Wiring of adapters into the HTTP handler state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::{
    BookingQueryService, BookingService, ItemService, RequestService, UserService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    MemoryBookingRepository, MemoryCommentRepository, MemoryItemRepository,
    MemoryRequestRepository, MemoryUserRepository,
};

/// Build the handler state over fresh in-memory stores and the system clock.
///
/// All services share the same store instances, so for example a booking
/// placed through the booking service is visible to the item enrichment.
#[must_use]
pub fn build_http_state() -> HttpState {
    let users = Arc::new(MemoryUserRepository::new());
    let items = Arc::new(MemoryItemRepository::new());
    let bookings = Arc::new(MemoryBookingRepository::new());
    let comments = Arc::new(MemoryCommentRepository::new());
    let requests = Arc::new(MemoryRequestRepository::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    HttpState {
        users: UserService::new(Arc::clone(&users)),
        items: ItemService::new(
            Arc::clone(&items),
            Arc::clone(&users),
            Arc::clone(&bookings),
            comments,
            Arc::clone(&requests),
            Arc::clone(&clock),
        ),
        bookings: BookingService::new(
            Arc::clone(&bookings),
            Arc::clone(&users),
            Arc::clone(&items),
            Arc::clone(&clock),
        ),
        booking_queries: BookingQueryService::new(
            Arc::clone(&bookings),
            Arc::clone(&users),
            Arc::clone(&items),
            Arc::clone(&clock),
        ),
        requests: RequestService::new(requests, users, items, clock),
    }
}
