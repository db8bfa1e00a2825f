//! Items API handlers.
//!
//! ```text
//! POST   /items                 {"name":"drill","description":"...","available":true}
//! PATCH  /items/{id}            {"available":false}
//! GET    /items/{id}
//! GET    /items?from=&size=     caller's own items
//! GET    /items/search?text=
//! DELETE /items/{id}
//! POST   /items/{id}/comment    {"text":"worked great"}
//! ```
//!
//! All mutating routes and the owner listing identify the caller through the
//! `X-Sharer-User-Id` header.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookingId, BookingRef, CommentId, CommentView, Error, Item, ItemDetails, ItemId, ItemPayload,
    ItemUpdate, RequestId, UserId,
};
use crate::inbound::http::identity::SharerId;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_from_query, require_non_blank, FieldName};
use crate::inbound::http::ApiResult;

const NAME_FIELD: FieldName = FieldName::new("name");
const DESCRIPTION_FIELD: FieldName = FieldName::new("description");
const TEXT_FIELD: FieldName = FieldName::new("text");

/// Listing body for `POST /items`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(default)]
    pub request_id: Option<RequestId>,
}

/// Partial update body for `PATCH /items/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub request_id: Option<RequestId>,
}

/// Comment body for `POST /items/{id}/comment`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Item record on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Comment joined with its author's display name.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.comment.id,
            text: view.comment.text,
            author_name: view.author_name,
            created: view.comment.created,
        }
    }
}

/// Abbreviated booking reference shown on owner item views.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortResponse {
    pub id: BookingId,
    pub booker_id: UserId,
}

impl From<BookingRef> for BookingShortResponse {
    fn from(booking: BookingRef) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

/// Item enriched with comments and, for owners, adjacent bookings.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailsResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingShortResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<BookingShortResponse>,
}

impl From<ItemDetails> for ItemDetailsResponse {
    fn from(details: ItemDetails) -> Self {
        Self {
            id: details.item.id,
            name: details.item.name,
            description: details.item.description,
            available: details.item.available,
            request_id: details.item.request_id,
            comments: details
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
            last_booking: details.last_booking.map(BookingShortResponse::from),
            next_booking: details.next_booking.map(BookingShortResponse::from),
        }
    }
}

/// Pagination query parameters shared by the listing routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// Query parameters for `GET /items/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

fn validate_create(payload: &CreateItemRequest) -> Result<(), Error> {
    require_non_blank(&payload.name, NAME_FIELD)?;
    require_non_blank(&payload.description, DESCRIPTION_FIELD)
}

fn validate_update(payload: &UpdateItemRequest) -> Result<(), Error> {
    if let Some(name) = &payload.name {
        require_non_blank(name, NAME_FIELD)?;
    }
    if let Some(description) = &payload.description {
        require_non_blank(description, DESCRIPTION_FIELD)?;
    }
    Ok(())
}

/// List a new item owned by the caller.
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item listed", body = ItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown caller or request", body = Error)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    sharer: SharerId,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    validate_create(&payload)?;
    let item = state
        .items
        .create(
            sharer.0,
            ItemPayload {
                name: payload.name,
                description: payload.description,
                available: payload.available,
                request_id: payload.request_id,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(ItemResponse::from(item)))
}

/// Apply a partial update; only the owner may update an item.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    request_body = UpdateItemRequest,
    params(("id" = i64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[patch("/items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let payload = payload.into_inner();
    validate_update(&payload)?;
    let item = state
        .items
        .update(
            sharer.0,
            ItemId::new(path.into_inner()),
            ItemUpdate {
                name: payload.name,
                description: payload.description,
                available: payload.available,
                request_id: payload.request_id,
            },
        )
        .await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Fetch one item with its comments; owners also see adjacent bookings.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item", body = ItemDetailsResponse),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ItemDetailsResponse>> {
    let details = state
        .items
        .get_by_id(ItemId::new(path.into_inner()), sharer.0)
        .await?;
    Ok(web::Json(ItemDetailsResponse::from(details)))
}

/// List the caller's items with comments and adjacent bookings.
#[utoipa::path(
    get,
    path = "/items",
    params(
        ("from" = Option<i64>, Query, description = "Offset of the first record, defaults to 0"),
        ("size" = Option<i64>, Query, description = "Page size, defaults to 10")
    ),
    responses(
        (status = 200, description = "Caller's items", body = [ItemDetailsResponse]),
        (status = 400, description = "Invalid pagination", body = Error)
    ),
    tags = ["items"],
    operation_id = "listOwnItems"
)]
#[get("/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    sharer: SharerId,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<ItemDetailsResponse>>> {
    let page = page_from_query(query.from, query.size)?;
    let details = state.items.list_for_owner(sharer.0, page).await?;
    Ok(web::Json(
        details.into_iter().map(ItemDetailsResponse::from).collect(),
    ))
}

/// Free-text search over available items.
#[utoipa::path(
    get,
    path = "/items/search",
    params(
        ("text" = String, Query, description = "Search text; blank yields an empty list"),
        ("from" = Option<i64>, Query, description = "Offset of the first record, defaults to 0"),
        ("size" = Option<i64>, Query, description = "Page size, defaults to 10")
    ),
    responses(
        (status = 200, description = "Matching items", body = [ItemResponse]),
        (status = 400, description = "Invalid pagination", body = Error)
    ),
    tags = ["items"],
    operation_id = "searchItems"
)]
#[get("/items/search")]
pub async fn search_items(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let page = page_from_query(query.from, query.size)?;
    let items = state.items.search(&query.text, page).await?;
    Ok(web::Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Remove an item; only the owner may delete it.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .items
        .delete(sharer.0, ItemId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Leave a comment on an item the caller has finished renting.
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    request_body = CreateCommentRequest,
    params(("id" = i64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Caller never rented the item", body = Error),
        (status = 404, description = "Unknown item or caller", body = Error)
    ),
    tags = ["items"],
    operation_id = "addComment"
)]
#[post("/items/{id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let payload = payload.into_inner();
    require_non_blank(&payload.text, TEXT_FIELD)?;
    let view = state
        .items
        .add_comment(ItemId::new(path.into_inner()), sharer.0, payload.text)
        .await?;
    Ok(web::Json(CommentResponse::from(view)))
}
