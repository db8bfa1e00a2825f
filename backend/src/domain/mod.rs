//! Domain entities, use-case services, and ports.
//!
//! The domain is transport and storage agnostic: inbound adapters call the
//! services, outbound adapters implement the traits in [`ports`].

pub mod booking;
pub mod booking_query_service;
pub mod booking_service;
pub(crate) mod booking_support;
pub mod comment;
pub mod error;
pub mod ids;
pub mod item;
pub mod item_service;
pub mod pagination;
pub mod ports;
pub mod request;
pub mod request_service;
pub mod user;
pub mod user_service;

pub use self::booking::{
    Booking, BookingDetails, BookingStateFilter, BookingStatus, NewBooking, UnknownStateError,
};
pub use self::booking_query_service::BookingQueryService;
pub use self::booking_service::{BookingPayload, BookingService};
pub use self::comment::{Comment, CommentView, NewComment};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{BookingId, CommentId, ItemId, RequestId, UserId};
pub use self::item::{Item, ItemUpdate, NewItem};
pub use self::item_service::{BookingRef, ItemDetails, ItemPayload, ItemService};
pub use self::pagination::PageRequest;
pub use self::request::{ItemRequest, NewRequest, RequestView};
pub use self::request_service::RequestService;
pub use self::user::{NewUser, User, UserUpdate};
pub use self::user_service::UserService;
