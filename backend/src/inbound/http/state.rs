//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without a running server.

use crate::domain::{
    BookingQueryService, BookingService, ItemService, RequestService, UserService,
};
use crate::outbound::persistence::{
    MemoryBookingRepository, MemoryCommentRepository, MemoryItemRepository,
    MemoryRequestRepository, MemoryUserRepository,
};

/// User service over the shipped adapters.
pub type AppUserService = UserService<MemoryUserRepository>;

/// Item service over the shipped adapters.
pub type AppItemService = ItemService<
    MemoryItemRepository,
    MemoryUserRepository,
    MemoryBookingRepository,
    MemoryCommentRepository,
    MemoryRequestRepository,
>;

/// Booking lifecycle service over the shipped adapters.
pub type AppBookingService =
    BookingService<MemoryBookingRepository, MemoryUserRepository, MemoryItemRepository>;

/// Booking query service over the shipped adapters.
pub type AppBookingQueryService =
    BookingQueryService<MemoryBookingRepository, MemoryUserRepository, MemoryItemRepository>;

/// Item request service over the shipped adapters.
pub type AppRequestService =
    RequestService<MemoryRequestRepository, MemoryUserRepository, MemoryItemRepository>;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: AppUserService,
    pub items: AppItemService,
    pub bookings: AppBookingService,
    pub booking_queries: AppBookingQueryService,
    pub requests: AppRequestService,
}
