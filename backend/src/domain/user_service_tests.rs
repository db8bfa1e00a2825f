//! Tests for user management.

use std::sync::Arc;

use mockall::predicate::eq;

use super::*;
use crate::domain::ports::{MockUserRepository, UserRepositoryError};
use crate::domain::ErrorCode;

fn user(id: i64, email: &str) -> User {
    User {
        id: UserId::new(id),
        name: format!("user-{id}"),
        email: email.to_owned(),
    }
}

fn service(users: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(users))
}

#[tokio::test]
async fn create_registers_user_with_free_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("ada@example.com"))
        .return_once(|_| Ok(None));
    users.expect_create().times(1).return_once(|new_user| {
        Ok(User {
            id: UserId::new(1),
            name: new_user.name,
            email: new_user.email,
        })
    });

    let created = service(users)
        .create(NewUser {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
        })
        .await
        .expect("registered");
    assert_eq!(created.id, UserId::new(1));
    assert_eq!(created.email, "ada@example.com");
}

#[tokio::test]
async fn create_rejects_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(user(1, "ada@example.com"))));
    users.expect_create().times(0);

    let error = service(users)
        .create(NewUser {
            name: "Imposter".to_owned(),
            email: "ada@example.com".to_owned(),
        })
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_applies_partial_fields() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(1, "ada@example.com"))));
    users
        .expect_update()
        .withf(|updated| updated.name == "Countess" && updated.email == "ada@example.com")
        .return_once(|_| Ok(()));

    let updated = service(users)
        .update(
            UserId::new(1),
            UserUpdate {
                name: Some("Countess".to_owned()),
                email: None,
            },
        )
        .await
        .expect("updated");
    assert_eq!(updated.name, "Countess");
    assert_eq!(updated.email, "ada@example.com");
}

#[tokio::test]
async fn update_rechecks_uniqueness_on_email_change() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(1, "ada@example.com"))));
    users
        .expect_find_by_email()
        .with(eq("taken@example.com"))
        .return_once(|_| Ok(Some(user(2, "taken@example.com"))));
    users.expect_update().times(0);

    let error = service(users)
        .update(
            UserId::new(1),
            UserUpdate {
                name: None,
                email: Some("taken@example.com".to_owned()),
            },
        )
        .await
        .expect_err("email taken");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_skips_uniqueness_check_for_unchanged_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(1, "ada@example.com"))));
    users.expect_find_by_email().times(0);
    users.expect_update().return_once(|_| Ok(()));

    let updated = service(users)
        .update(
            UserId::new(1),
            UserUpdate {
                name: None,
                email: Some("ada@example.com".to_owned()),
            },
        )
        .await
        .expect("no-op email");
    assert_eq!(updated.email, "ada@example.com");
}

#[tokio::test]
async fn get_by_id_surfaces_missing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(users)
        .get_by_id(UserId::new(404))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_resolves_before_removing() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    users.expect_delete().times(0);

    let error = service(users)
        .delete(UserId::new(404))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_removes_existing_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user(1, "ada@example.com"))));
    users
        .expect_delete()
        .with(eq(UserId::new(1)))
        .times(1)
        .return_once(|_| Ok(()));

    service(users)
        .delete(UserId::new(1))
        .await
        .expect("deleted");
}

#[tokio::test]
async fn repository_connection_failures_surface_as_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserRepositoryError::connection("pool exhausted")));

    let error = service(users)
        .get_by_id(UserId::new(1))
        .await
        .expect_err("store down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
