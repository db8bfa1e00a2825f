//! HTTP inbound adapter exposing the REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod identity;
pub mod items;
pub mod requests;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
