//! Tests for the booking lifecycle engine.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;

use super::*;
use crate::domain::ports::{
    BookingRepositoryError, MockBookingRepository, MockItemRepository, MockUserRepository,
};
use crate::domain::ErrorCode;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn clock_at(now: DateTime<Utc>) -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn user(id: i64) -> User {
    User {
        id: UserId::new(id),
        name: format!("user-{id}"),
        email: format!("user{id}@example.com"),
    }
}

fn item(id: i64, owner: i64, available: bool) -> Item {
    Item {
        id: ItemId::new(id),
        name: "drill".to_owned(),
        description: "cordless drill".to_owned(),
        available,
        owner_id: UserId::new(owner),
        request_id: None,
    }
}

fn waiting_booking(id: i64, item_id: i64, booker: i64) -> Booking {
    Booking {
        id: BookingId::new(id),
        item_id: ItemId::new(item_id),
        booker_id: UserId::new(booker),
        start: fixed_now() + Duration::days(1),
        end: fixed_now() + Duration::days(2),
        status: BookingStatus::Waiting,
        created: fixed_now(),
    }
}

fn payload() -> BookingPayload {
    BookingPayload {
        item_id: ItemId::new(10),
        start: fixed_now() + Duration::days(1),
        end: fixed_now() + Duration::days(2),
    }
}

fn service(
    bookings: MockBookingRepository,
    users: MockUserRepository,
    items: MockItemRepository,
) -> BookingService<MockBookingRepository, MockUserRepository, MockItemRepository> {
    BookingService::new(
        Arc::new(bookings),
        Arc::new(users),
        Arc::new(items),
        clock_at(fixed_now()),
    )
}

#[tokio::test]
async fn create_persists_waiting_booking() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(2))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .return_once(|_| Ok(Some(item(10, 1, true))));
    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().times(1).return_once(|new_booking| {
        assert_eq!(new_booking.status, BookingStatus::Waiting);
        assert_eq!(new_booking.created, fixed_now());
        assert_eq!(new_booking.item_id, ItemId::new(10));
        assert_eq!(new_booking.booker_id, UserId::new(2));
        Ok(Booking {
            id: BookingId::new(1),
            item_id: new_booking.item_id,
            booker_id: new_booking.booker_id,
            start: new_booking.start,
            end: new_booking.end,
            status: new_booking.status,
            created: new_booking.created,
        })
    });

    let details = service(bookings, users, items)
        .create(UserId::new(2), payload())
        .await
        .expect("booking created");

    assert_eq!(details.booking.status, BookingStatus::Waiting);
    assert_eq!(details.booker.id, UserId::new(2));
    assert_eq!(details.item.id, ItemId::new(10));
}

#[tokio::test]
async fn create_rejects_unknown_caller() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let mut items = MockItemRepository::new();
    items.expect_find_by_id().times(0);
    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().times(0);

    let error = service(bookings, users, items)
        .create(UserId::new(99), payload())
        .await
        .expect_err("unknown caller");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_rejects_unknown_item() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(2))));
    let mut items = MockItemRepository::new();
    items.expect_find_by_id().return_once(|_| Ok(None));
    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().times(0);

    let error = service(bookings, users, items)
        .create(UserId::new(2), payload())
        .await
        .expect_err("unknown item");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_rejects_unavailable_item() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(2))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .return_once(|_| Ok(Some(item(10, 1, false))));
    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().times(0);

    let error = service(bookings, users, items)
        .create(UserId::new(2), payload())
        .await
        .expect_err("unavailable item");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_forbids_owner_booking_own_item() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(1))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .return_once(|_| Ok(Some(item(10, 1, true))));
    let mut bookings = MockBookingRepository::new();
    bookings.expect_create().times(0);

    let error = service(bookings, users, items)
        .create(UserId::new(1), payload())
        .await
        .expect_err("owner cannot book");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "owner cannot book own item");
}

#[tokio::test]
async fn create_rejects_end_not_after_start() {
    for end_offset in [Duration::days(-1), Duration::zero()] {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(user(2))));
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_id()
            .return_once(|_| Ok(Some(item(10, 1, true))));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_create().times(0);

        let start = fixed_now() + Duration::days(2);
        let error = service(bookings, users, items)
            .create(
                UserId::new(2),
                BookingPayload {
                    item_id: ItemId::new(10),
                    start,
                    end: start + end_offset,
                },
            )
            .await
            .expect_err("inverted range");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}

#[tokio::test]
async fn create_maps_connection_error_to_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(2))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .return_once(|_| Ok(Some(item(10, 1, true))));
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_create()
        .return_once(|_| Err(BookingRepositoryError::connection("pool down")));

    let error = service(bookings, users, items)
        .create(UserId::new(2), payload())
        .await
        .expect_err("store down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn decide_approves_waiting_booking() {
    let booking = waiting_booking(5, 10, 2);
    let mut bookings = MockBookingRepository::new();
    {
        let booking = booking.clone();
        bookings
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(booking)));
    }
    bookings
        .expect_transition_from_waiting()
        .times(1)
        .return_once(move |_, next| {
            assert_eq!(next, BookingStatus::Approved);
            let mut updated = booking;
            updated.status = next;
            Ok(Some(StatusTransition::Applied(updated)))
        });
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id.value()))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .returning(|_| Ok(Some(item(10, 1, true))));

    let details = service(bookings, users, items)
        .decide(UserId::new(1), BookingId::new(5), true)
        .await
        .expect("approved");
    assert_eq!(details.booking.status, BookingStatus::Approved);
}

#[tokio::test]
async fn decide_rejects_waiting_booking_when_not_approved() {
    let booking = waiting_booking(5, 10, 2);
    let mut bookings = MockBookingRepository::new();
    {
        let booking = booking.clone();
        bookings
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(booking)));
    }
    bookings
        .expect_transition_from_waiting()
        .return_once(move |_, next| {
            assert_eq!(next, BookingStatus::Rejected);
            let mut updated = booking;
            updated.status = next;
            Ok(Some(StatusTransition::Applied(updated)))
        });
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(user(id.value()))));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .returning(|_| Ok(Some(item(10, 1, true))));

    let details = service(bookings, users, items)
        .decide(UserId::new(1), BookingId::new(5), false)
        .await
        .expect("rejected");
    assert_eq!(details.booking.status, BookingStatus::Rejected);
}

#[tokio::test]
async fn decide_forbids_non_owner() {
    let booking = waiting_booking(5, 10, 2);
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(booking)));
    bookings.expect_transition_from_waiting().times(0);
    let users = MockUserRepository::new();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .returning(|_| Ok(Some(item(10, 1, true))));

    let error = service(bookings, users, items)
        .decide(UserId::new(3), BookingId::new(5), true)
        .await
        .expect_err("not the owner");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn decide_forbids_second_decision_regardless_of_flag() {
    for approve in [true, false] {
        let mut booking = waiting_booking(5, 10, 2);
        booking.status = BookingStatus::Approved;
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(booking)));
        bookings.expect_transition_from_waiting().times(0);
        let users = MockUserRepository::new();
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_id()
            .returning(|_| Ok(Some(item(10, 1, true))));

        let error = service(bookings, users, items)
            .decide(UserId::new(1), BookingId::new(5), approve)
            .await
            .expect_err("already decided");
        assert_eq!(error.code(), ErrorCode::Forbidden);
        assert!(error.message().contains("already decided"));
    }
}

#[tokio::test]
async fn decide_surfaces_lost_compare_and_set_race_as_forbidden() {
    let booking = waiting_booking(5, 10, 2);
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(booking)));
    // A concurrent decision landed between the read and the write.
    bookings
        .expect_transition_from_waiting()
        .return_once(|_, _| Ok(Some(StatusTransition::AlreadyDecided(BookingStatus::Rejected))));
    let users = MockUserRepository::new();
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .returning(|_| Ok(Some(item(10, 1, true))));

    let error = service(bookings, users, items)
        .decide(UserId::new(1), BookingId::new(5), true)
        .await
        .expect_err("race lost");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn decide_rejects_unknown_booking() {
    let mut bookings = MockBookingRepository::new();
    bookings.expect_find_by_id().return_once(|_| Ok(None));
    let users = MockUserRepository::new();
    let items = MockItemRepository::new();

    let error = service(bookings, users, items)
        .decide(UserId::new(1), BookingId::new(404), true)
        .await
        .expect_err("missing booking");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_by_id_allows_booker_and_owner() {
    for caller in [2_i64, 1_i64] {
        let booking = waiting_booking(5, 10, 2);
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(booking)));
        let mut users = MockUserRepository::new();
        users.expect_exists_by_id().return_once(|_| Ok(true));
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id.value()))));
        let mut items = MockItemRepository::new();
        items
            .expect_find_by_id()
            .returning(|_| Ok(Some(item(10, 1, true))));

        let details = service(bookings, users, items)
            .get_by_id(UserId::new(caller), BookingId::new(5))
            .await
            .expect("accessible");
        assert_eq!(details.booking.id, BookingId::new(5));
        assert_eq!(details.booking.item_id, ItemId::new(10));
        assert_eq!(details.booking.booker_id, UserId::new(2));
    }
}

#[tokio::test]
async fn get_by_id_forbids_strangers() {
    let booking = waiting_booking(5, 10, 2);
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(booking)));
    let mut users = MockUserRepository::new();
    users.expect_exists_by_id().return_once(|_| Ok(true));
    let mut items = MockItemRepository::new();
    items
        .expect_find_by_id()
        .returning(|_| Ok(Some(item(10, 1, true))));

    let error = service(bookings, users, items)
        .get_by_id(UserId::new(7), BookingId::new(5))
        .await
        .expect_err("no access");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn get_by_id_requires_existing_caller() {
    let mut bookings = MockBookingRepository::new();
    bookings.expect_find_by_id().times(0);
    let mut users = MockUserRepository::new();
    users.expect_exists_by_id().return_once(|_| Ok(false));
    let items = MockItemRepository::new();

    let error = service(bookings, users, items)
        .get_by_id(UserId::new(7), BookingId::new(5))
        .await
        .expect_err("unknown caller");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
