//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers every HTTP endpoint from the inbound layer, the wire schemas,
//! and the `X-Sharer-User-Id` identity scheme. Debug builds serve the
//! generated document at `/api-docs/openapi.json`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{BookingStatus, Error, ErrorCode};
use crate::inbound::http::bookings::{BookingResponse, CreateBookingRequest};
use crate::inbound::http::items::{
    BookingShortResponse, CommentResponse, CreateCommentRequest, CreateItemRequest,
    ItemDetailsResponse, ItemResponse, UpdateItemRequest,
};
use crate::inbound::http::requests::{CreateRequestRequest, RequestResponse};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Enrich the generated document with the identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SharerUserId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Sharer-User-Id",
                "Identifier of the calling user, set on every identity-gated request.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "ShareIt backend API",
        description = "HTTP interface for sharing items: users, items, bookings, \
                       item requests, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SharerUserId" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::search_items,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::items::add_comment,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::decide_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::list_requester_bookings,
        crate::inbound::http::bookings::list_owner_bookings,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_own_requests,
        crate::inbound::http::requests::list_other_requests,
        crate::inbound::http::requests::get_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        BookingStatus,
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        ItemResponse,
        ItemDetailsResponse,
        CommentResponse,
        BookingShortResponse,
        CreateItemRequest,
        UpdateItemRequest,
        CreateCommentRequest,
        BookingResponse,
        CreateBookingRequest,
        RequestResponse,
        CreateRequestRequest,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "items", description = "Shareable items, search, and comments"),
        (name = "bookings", description = "Booking lifecycle and listings"),
        (name = "requests", description = "Item requests posted by users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
