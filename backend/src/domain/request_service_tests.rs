//! Tests for item requests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;

use super::*;
use crate::domain::ports::{MockItemRepository, MockRequestRepository, MockUserRepository};
use crate::domain::{ErrorCode, ItemId};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn request(id: i64, requester: i64, age: Duration) -> ItemRequest {
    ItemRequest {
        id: RequestId::new(id),
        description: "need a drill".to_owned(),
        requester_id: UserId::new(requester),
        created: fixed_now() - age,
    }
}

fn answering_item(id: i64, request_id: i64) -> Item {
    Item {
        id: ItemId::new(id),
        name: "drill".to_owned(),
        description: "cordless drill".to_owned(),
        available: true,
        owner_id: UserId::new(1),
        request_id: Some(RequestId::new(request_id)),
    }
}

fn service(
    requests: MockRequestRepository,
    users: MockUserRepository,
    items: MockItemRepository,
) -> RequestService<MockRequestRepository, MockUserRepository, MockItemRepository> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(fixed_now());
    RequestService::new(
        Arc::new(requests),
        Arc::new(users),
        Arc::new(items),
        Arc::new(clock),
    )
}

fn existing_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_exists_by_id().returning(|_| Ok(true));
    users
}

#[tokio::test]
async fn create_stamps_request_with_now() {
    let mut requests = MockRequestRepository::new();
    requests.expect_create().return_once(|new_request| {
        assert_eq!(new_request.created, fixed_now());
        assert_eq!(new_request.requester_id, UserId::new(2));
        Ok(ItemRequest {
            id: RequestId::new(1),
            description: new_request.description,
            requester_id: new_request.requester_id,
            created: new_request.created,
        })
    });

    let created = service(requests, existing_users(), MockItemRepository::new())
        .create(UserId::new(2), "need a drill".to_owned())
        .await
        .expect("posted");
    assert_eq!(created.id, RequestId::new(1));
    assert_eq!(created.created, fixed_now());
}

#[tokio::test]
async fn create_requires_existing_caller() {
    let mut requests = MockRequestRepository::new();
    requests.expect_create().times(0);
    let mut users = MockUserRepository::new();
    users.expect_exists_by_id().return_once(|_| Ok(false));

    let error = service(requests, users, MockItemRepository::new())
        .create(UserId::new(99), "need a drill".to_owned())
        .await
        .expect_err("unknown caller");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_own_joins_answering_items() {
    let mut requests = MockRequestRepository::new();
    requests.expect_list_by_requester().return_once(|_| {
        Ok(vec![
            request(2, 2, Duration::days(1)),
            request(1, 2, Duration::days(3)),
        ])
    });
    let mut items = MockItemRepository::new();
    items
        .expect_list_by_request_ids()
        .withf(|ids| *ids == [RequestId::new(2), RequestId::new(1)])
        .return_once(|_| Ok(vec![answering_item(10, 1), answering_item(11, 1)]));

    let views = service(requests, existing_users(), items)
        .list_own(UserId::new(2))
        .await
        .expect("own requests");
    assert_eq!(views.len(), 2);
    assert!(views[0].items.is_empty());
    assert_eq!(views[1].items.len(), 2);
}

#[tokio::test]
async fn list_others_windows_before_joining() {
    let mut requests = MockRequestRepository::new();
    requests.expect_list_excluding_requester().return_once(|_| {
        Ok(vec![
            request(5, 3, Duration::days(1)),
            request(4, 3, Duration::days(2)),
            request(3, 4, Duration::days(3)),
        ])
    });
    let mut items = MockItemRepository::new();
    items
        .expect_list_by_request_ids()
        .withf(|ids| *ids == [RequestId::new(5), RequestId::new(4)])
        .return_once(|_| Ok(Vec::new()));

    let views = service(requests, existing_users(), items)
        .list_others(UserId::new(2), PageRequest::new(0, 2).expect("valid page"))
        .await
        .expect("other requests");
    let ids: Vec<i64> = views.iter().map(|v| v.request.id.value()).collect();
    assert_eq!(ids, vec![5, 4]);
}

#[tokio::test]
async fn get_by_id_returns_request_with_items() {
    let mut requests = MockRequestRepository::new();
    requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(request(1, 2, Duration::days(3)))));
    let mut items = MockItemRepository::new();
    items
        .expect_list_by_request_ids()
        .return_once(|_| Ok(vec![answering_item(10, 1)]));

    let view = service(requests, existing_users(), items)
        .get_by_id(UserId::new(3), RequestId::new(1))
        .await
        .expect("request view");
    assert_eq!(view.request.id, RequestId::new(1));
    assert_eq!(view.items.len(), 1);
}

#[tokio::test]
async fn get_by_id_surfaces_missing_request() {
    let mut requests = MockRequestRepository::new();
    requests.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(requests, existing_users(), MockItemRepository::new())
        .get_by_id(UserId::new(3), RequestId::new(404))
        .await
        .expect_err("missing request");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
