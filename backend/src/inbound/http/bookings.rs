//! Bookings API handlers.
//!
//! ```text
//! POST  /bookings                         {"itemId":1,"start":"...","end":"..."}
//! PATCH /bookings/{id}?approved=true
//! GET   /bookings/{id}
//! GET   /bookings?state=&from=&size=       caller's bookings, newest start first
//! GET   /bookings/owner?state=&from=&size= bookings of the caller's items
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BookingDetails, BookingId, BookingPayload, BookingStatus, Error, ItemId};
use crate::inbound::http::identity::SharerId;
use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::page_from_query;
use crate::inbound::http::ApiResult;

/// Booking body for `POST /bookings`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Booking record on the wire, joined with its booker and item.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: UserResponse,
    pub item: ItemResponse,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        Self {
            id: details.booking.id,
            start: details.booking.start,
            end: details.booking.end,
            status: details.booking.status,
            booker: UserResponse::from(details.booker),
            item: ItemResponse::from(details.item),
        }
    }
}

/// Query parameter for `PATCH /bookings/{id}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DecisionQuery {
    pub approved: bool,
}

/// Query parameters shared by both booking listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

impl BookingListQuery {
    fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("ALL")
    }
}

fn to_responses(details: Vec<BookingDetails>) -> Vec<BookingResponse> {
    details.into_iter().map(BookingResponse::from).collect()
}

/// Place a new booking request for the caller.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking placed, waiting for the owner", body = BookingResponse),
        (status = 400, description = "Item unavailable or invalid time range", body = Error),
        (status = 403, description = "Owner tried to book own item", body = Error),
        (status = 404, description = "Unknown caller or item", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    sharer: SharerId,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let details = state
        .bookings
        .create(
            sharer.0,
            BookingPayload {
                item_id: payload.item_id,
                start: payload.start,
                end: payload.end,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(details)))
}

/// Approve or reject a waiting booking as the item owner.
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking identifier"),
        ("approved" = bool, Query, description = "true approves, false rejects")
    ),
    responses(
        (status = 200, description = "Decision applied", body = BookingResponse),
        (status = 403, description = "Not the owner, or already decided", body = Error),
        (status = 404, description = "Unknown booking", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "decideBooking"
)]
#[patch("/bookings/{id}")]
pub async fn decide_booking(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
    query: web::Query<DecisionQuery>,
) -> ApiResult<web::Json<BookingResponse>> {
    let details = state
        .bookings
        .decide(sharer.0, BookingId::new(path.into_inner()), query.approved)
        .await?;
    Ok(web::Json(BookingResponse::from(details)))
}

/// Bookings against the caller's items.
#[utoipa::path(
    get,
    path = "/bookings/owner",
    params(
        ("state" = Option<String>, Query, description = "State bucket, defaults to ALL"),
        ("from" = Option<i64>, Query, description = "Offset of the first record, defaults to 0"),
        ("size" = Option<i64>, Query, description = "Page size, defaults to 10")
    ),
    responses(
        (status = 200, description = "Bookings of the caller's items", body = [BookingResponse]),
        (status = 400, description = "Unknown state or invalid pagination", body = Error),
        (status = 404, description = "Caller owns no items", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listOwnerBookings"
)]
#[get("/bookings/owner")]
pub async fn list_owner_bookings(
    state: web::Data<HttpState>,
    sharer: SharerId,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let page = page_from_query(query.from, query.size)?;
    let details = state
        .booking_queries
        .for_owner(sharer.0, query.state(), page)
        .await?;
    Ok(web::Json(to_responses(details)))
}

/// Fetch a booking visible to the caller.
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = i64, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 403, description = "Caller is neither booker nor owner", body = Error),
        (status = 404, description = "Unknown booking or caller", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingResponse>> {
    let details = state
        .bookings
        .get_by_id(sharer.0, BookingId::new(path.into_inner()))
        .await?;
    Ok(web::Json(BookingResponse::from(details)))
}

/// Bookings placed by the caller.
#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("state" = Option<String>, Query, description = "State bucket, defaults to ALL"),
        ("from" = Option<i64>, Query, description = "Offset of the first record, defaults to 0"),
        ("size" = Option<i64>, Query, description = "Page size, defaults to 10")
    ),
    responses(
        (status = 200, description = "Caller's bookings", body = [BookingResponse]),
        (status = 400, description = "Unknown state or invalid pagination", body = Error),
        (status = 404, description = "Unknown caller", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listRequesterBookings"
)]
#[get("/bookings")]
pub async fn list_requester_bookings(
    state: web::Data<HttpState>,
    sharer: SharerId,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let page = page_from_query(query.from, query.size)?;
    let details = state
        .booking_queries
        .for_requester(sharer.0, query.state(), page)
        .await?;
    Ok(web::Json(to_responses(details)))
}
