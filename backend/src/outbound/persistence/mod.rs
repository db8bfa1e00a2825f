//! In-memory persistence adapters.
//!
//! Each adapter keeps its aggregate in a `RwLock`-guarded map with an atomic
//! sequence for identifier assignment. The booking adapter applies the status
//! transition as a compare-and-set under the write lock, so the single
//! `WAITING -> decided` step is race free.

mod memory_booking_repository;
mod memory_comment_repository;
mod memory_item_repository;
mod memory_request_repository;
mod memory_user_repository;

pub use memory_booking_repository::MemoryBookingRepository;
pub use memory_comment_repository::MemoryCommentRepository;
pub use memory_item_repository::MemoryItemRepository;
pub use memory_request_repository::MemoryRequestRepository;
pub use memory_user_repository::MemoryUserRepository;
