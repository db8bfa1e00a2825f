//! Users API handlers.
//!
//! ```text
//! POST   /users        {"name":"Ada","email":"ada@example.com"}
//! PATCH  /users/{id}   {"email":"new@example.com"}
//! GET    /users/{id}
//! GET    /users
//! DELETE /users/{id}
//! ```

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser, User, UserId, UserUpdate};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_email_shape, require_non_blank, FieldName};
use crate::inbound::http::ApiResult;

const NAME_FIELD: FieldName = FieldName::new("name");
const EMAIL_FIELD: FieldName = FieldName::new("email");

/// Registration body for `POST /users`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Partial update body for `PATCH /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// User record on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

fn validate_create(payload: &CreateUserRequest) -> Result<(), Error> {
    require_non_blank(&payload.name, NAME_FIELD)?;
    require_email_shape(&payload.email, EMAIL_FIELD)
}

fn validate_update(payload: &UpdateUserRequest) -> Result<(), Error> {
    if let Some(name) = &payload.name {
        require_non_blank(name, NAME_FIELD)?;
    }
    if let Some(email) = &payload.email {
        require_email_shape(email, EMAIL_FIELD)?;
    }
    Ok(())
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    validate_create(&payload)?;
    let user = state
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Apply a partial update to a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    validate_update(&payload)?;
    let user = state
        .users
        .update(
            UserId::new(path.into_inner()),
            UserUpdate {
                name: payload.name,
                email: payload.email,
            },
        )
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.get_by_id(UserId::new(path.into_inner())).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [UserResponse])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.users.delete(UserId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}
