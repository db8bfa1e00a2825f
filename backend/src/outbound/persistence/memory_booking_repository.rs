//! In-memory [`BookingRepository`] adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{BookingRepository, BookingRepositoryError, StatusTransition};
use crate::domain::{Booking, BookingId, BookingStatus, ItemId, NewBooking, UserId};

/// Map-backed booking store.
#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    rows: RwLock<HashMap<i64, Booking>>,
    sequence: AtomicI64,
}

impl MemoryBookingRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> BookingId {
        BookingId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<i64, Booking>>, BookingRepositoryError> {
        self.rows
            .read()
            .map_err(|_| BookingRepositoryError::query("booking store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i64, Booking>>, BookingRepositoryError> {
        self.rows
            .write()
            .map_err(|_| BookingRepositoryError::query("booking store lock poisoned"))
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn create(&self, new_booking: NewBooking) -> Result<Booking, BookingRepositoryError> {
        let booking = Booking {
            id: self.next_id(),
            item_id: new_booking.item_id,
            booker_id: new_booking.booker_id,
            start: new_booking.start,
            end: new_booking.end,
            status: new_booking.status,
            created: new_booking.created,
        };
        self.write()?.insert(booking.id.value(), booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self.read()?.get(&id.value()).cloned())
    }

    async fn transition_from_waiting(
        &self,
        id: BookingId,
        next: BookingStatus,
    ) -> Result<Option<StatusTransition>, BookingRepositoryError> {
        let mut rows = self.write()?;
        let Some(row) = rows.get_mut(&id.value()) else {
            return Ok(None);
        };
        if row.status == BookingStatus::Waiting {
            row.status = next;
            Ok(Some(StatusTransition::Applied(row.clone())))
        } else {
            Ok(Some(StatusTransition::AlreadyDecided(row.status)))
        }
    }

    async fn list_by_booker(
        &self,
        booker_id: UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|booking| booking.booker_id == booker_id)
            .cloned()
            .collect())
    }

    async fn list_by_items(
        &self,
        item_ids: &[ItemId],
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|booking| item_ids.contains(&booking.item_id))
            .cloned()
            .collect())
    }

    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|booking| booking.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn exists_finished(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        before: DateTime<Utc>,
    ) -> Result<bool, BookingRepositoryError> {
        Ok(self.read()?.values().any(|booking| {
            booking.booker_id == booker_id && booking.item_id == item_id && booking.end < before
        }))
    }
}
