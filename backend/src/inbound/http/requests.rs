//! Item request API handlers.
//!
//! ```text
//! POST /requests                {"description":"need a drill"}
//! GET  /requests                caller's own requests, newest first
//! GET  /requests/all?from=&size= other users' requests
//! GET  /requests/{id}
//! ```

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ItemRequest, RequestId, RequestView};
use crate::inbound::http::identity::SharerId;
use crate::inbound::http::items::{ItemResponse, PageQuery};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_from_query, require_non_blank, FieldName};
use crate::inbound::http::ApiResult;

const DESCRIPTION_FIELD: FieldName = FieldName::new("description");

/// Request body for `POST /requests`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    pub description: String,
}

/// Item request on the wire, with the items listed in answer to it.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: RequestId,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemResponse>,
}

impl From<RequestView> for RequestResponse {
    fn from(view: RequestView) -> Self {
        Self {
            id: view.request.id,
            description: view.request.description,
            created: view.request.created,
            items: view.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

impl From<ItemRequest> for RequestResponse {
    fn from(request: ItemRequest) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items: Vec::new(),
        }
    }
}

fn to_responses(views: Vec<RequestView>) -> Vec<RequestResponse> {
    views.into_iter().map(RequestResponse::from).collect()
}

/// Post a new item request.
#[utoipa::path(
    post,
    path = "/requests",
    request_body = CreateRequestRequest,
    responses(
        (status = 201, description = "Request posted", body = RequestResponse),
        (status = 400, description = "Blank description", body = Error),
        (status = 404, description = "Unknown caller", body = Error)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    sharer: SharerId,
    payload: web::Json<CreateRequestRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    require_non_blank(&payload.description, DESCRIPTION_FIELD)?;
    let request = state.requests.create(sharer.0, payload.description).await?;
    Ok(HttpResponse::Created().json(RequestResponse::from(request)))
}

/// The caller's own requests with their answering items, newest first.
#[utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "Caller's requests", body = [RequestResponse]),
        (status = 404, description = "Unknown caller", body = Error)
    ),
    tags = ["requests"],
    operation_id = "listOwnRequests"
)]
#[get("/requests")]
pub async fn list_own_requests(
    state: web::Data<HttpState>,
    sharer: SharerId,
) -> ApiResult<web::Json<Vec<RequestResponse>>> {
    let views = state.requests.list_own(sharer.0).await?;
    Ok(web::Json(to_responses(views)))
}

/// Requests posted by other users, newest first.
#[utoipa::path(
    get,
    path = "/requests/all",
    params(
        ("from" = Option<i64>, Query, description = "Offset of the first record, defaults to 0"),
        ("size" = Option<i64>, Query, description = "Page size, defaults to 10")
    ),
    responses(
        (status = 200, description = "Other users' requests", body = [RequestResponse]),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 404, description = "Unknown caller", body = Error)
    ),
    tags = ["requests"],
    operation_id = "listOtherRequests"
)]
#[get("/requests/all")]
pub async fn list_other_requests(
    state: web::Data<HttpState>,
    sharer: SharerId,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<RequestResponse>>> {
    let page = page_from_query(query.from, query.size)?;
    let views = state.requests.list_others(sharer.0, page).await?;
    Ok(web::Json(to_responses(views)))
}

/// Fetch one request with its answering items.
#[utoipa::path(
    get,
    path = "/requests/{id}",
    params(("id" = i64, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Request", body = RequestResponse),
        (status = 404, description = "Unknown request or caller", body = Error)
    ),
    tags = ["requests"],
    operation_id = "getRequest"
)]
#[get("/requests/{id}")]
pub async fn get_request(
    state: web::Data<HttpState>,
    sharer: SharerId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RequestResponse>> {
    let view = state
        .requests
        .get_by_id(sharer.0, RequestId::new(path.into_inner()))
        .await?;
    Ok(web::Json(RequestResponse::from(view)))
}
