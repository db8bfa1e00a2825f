//! Shared helpers for the booking lifecycle and query services: repository
//! error mapping and the read-only booker/item joins.

use std::collections::HashMap;

use crate::domain::ports::{
    BookingRepositoryError, ItemRepository, ItemRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Booking, BookingDetails, BookingId, Error, Item, ItemId, User, UserId};

pub(crate) fn map_booking_repo_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking store unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking store error: {message}"))
        }
    }
}

pub(crate) fn map_user_repo_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

pub(crate) fn map_item_repo_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("item directory unavailable: {message}"))
        }
        ItemRepositoryError::Query { message } => {
            Error::internal(format!("item directory error: {message}"))
        }
    }
}

/// Load the booker and item referenced by one booking.
///
/// A booking always points at persisted records, so a missing join row is an
/// internal inconsistency rather than a caller error.
pub(crate) async fn join_one<U, I>(
    users: &U,
    items: &I,
    booking: Booking,
) -> Result<BookingDetails, Error>
where
    U: UserRepository,
    I: ItemRepository,
{
    let booker = find_booker(users, booking.booker_id, booking.id).await?;
    let item = find_item(items, booking.item_id, booking.id).await?;
    Ok(BookingDetails {
        booking,
        booker,
        item,
    })
}

/// Join a page of bookings, fetching each referenced user and item once.
pub(crate) async fn join_page<U, I>(
    users: &U,
    items: &I,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingDetails>, Error>
where
    U: UserRepository,
    I: ItemRepository,
{
    let mut bookers: HashMap<UserId, User> = HashMap::new();
    let mut joined_items: HashMap<ItemId, Item> = HashMap::new();

    for booking in &bookings {
        if !bookers.contains_key(&booking.booker_id) {
            let booker = find_booker(users, booking.booker_id, booking.id).await?;
            bookers.insert(booking.booker_id, booker);
        }
        if !joined_items.contains_key(&booking.item_id) {
            let item = find_item(items, booking.item_id, booking.id).await?;
            joined_items.insert(booking.item_id, item);
        }
    }

    Ok(bookings
        .into_iter()
        .map(|booking| {
            let booker = bookers[&booking.booker_id].clone();
            let item = joined_items[&booking.item_id].clone();
            BookingDetails {
                booking,
                booker,
                item,
            }
        })
        .collect())
}

async fn find_booker<U>(users: &U, booker_id: UserId, booking_id: BookingId) -> Result<User, Error>
where
    U: UserRepository,
{
    users
        .find_by_id(booker_id)
        .await
        .map_err(map_user_repo_error)?
        .ok_or_else(|| Error::internal(format!("booker {booker_id} missing for booking {booking_id}")))
}

async fn find_item<I>(items: &I, item_id: ItemId, booking_id: BookingId) -> Result<Item, Error>
where
    I: ItemRepository,
{
    items
        .find_by_id(item_id)
        .await
        .map_err(map_item_repo_error)?
        .ok_or_else(|| Error::internal(format!("item {item_id} missing for booking {booking_id}")))
}
