//! Caller identity extractor.
//!
//! Requests carry the caller's user id in the `X-Sharer-User-Id` header;
//! handlers receive it as a typed [`SharerId`] argument. Identity here means
//! "who the caller claims to be": the header is trusted, and existence checks
//! stay with the domain services.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use serde_json::json;

use crate::domain::{Error, UserId};

/// HTTP header carrying the caller's user id.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// The caller id taken from `X-Sharer-User-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub UserId);

impl FromRequest for SharerId {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_sharer_id(req.headers()))
    }
}

fn extract_sharer_id(headers: &HeaderMap) -> Result<SharerId, Error> {
    let value = headers.get(SHARER_USER_ID_HEADER).ok_or_else(|| {
        Error::invalid_request(format!("missing {SHARER_USER_ID_HEADER} header"))
            .with_details(json!({ "header": SHARER_USER_ID_HEADER, "code": "missing_header" }))
    })?;

    let raw = value.to_str().map_err(|_| bad_header_value("<binary>"))?;
    let id: i64 = raw.trim().parse().map_err(|_| bad_header_value(raw))?;
    Ok(SharerId(UserId::new(id)))
}

fn bad_header_value(value: &str) -> Error {
    Error::invalid_request(format!("{SHARER_USER_ID_HEADER} must be an integer")).with_details(
        json!({
            "header": SHARER_USER_ID_HEADER,
            "value": value,
            "code": "invalid_header",
        }),
    )
}
