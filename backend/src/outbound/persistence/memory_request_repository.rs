//! In-memory [`RequestRepository`] adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{RequestRepository, RequestRepositoryError};
use crate::domain::{ItemRequest, NewRequest, RequestId, UserId};

/// Map-backed item request store.
#[derive(Debug, Default)]
pub struct MemoryRequestRepository {
    rows: RwLock<HashMap<i64, ItemRequest>>,
    sequence: AtomicI64,
}

impl MemoryRequestRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> RequestId {
        RequestId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn read(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<i64, ItemRequest>>, RequestRepositoryError> {
        self.rows
            .read()
            .map_err(|_| RequestRepositoryError::query("request store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<i64, ItemRequest>>, RequestRepositoryError> {
        self.rows
            .write()
            .map_err(|_| RequestRepositoryError::query("request store lock poisoned"))
    }

    fn list_where(
        &self,
        keep: impl Fn(&ItemRequest) -> bool,
    ) -> Result<Vec<ItemRequest>, RequestRepositoryError> {
        let mut requests: Vec<ItemRequest> = self
            .read()?
            .values()
            .filter(|request| keep(request))
            .cloned()
            .collect();
        // Newest first, id breaking creation ties.
        requests.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(requests)
    }
}

#[async_trait]
impl RequestRepository for MemoryRequestRepository {
    async fn create(
        &self,
        new_request: NewRequest,
    ) -> Result<ItemRequest, RequestRepositoryError> {
        let request = ItemRequest {
            id: self.next_id(),
            description: new_request.description,
            requester_id: new_request.requester_id,
            created: new_request.created,
        };
        self.write()?.insert(request.id.value(), request.clone());
        Ok(request)
    }

    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ItemRequest>, RequestRepositoryError> {
        Ok(self.read()?.get(&id.value()).cloned())
    }

    async fn list_by_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<ItemRequest>, RequestRepositoryError> {
        self.list_where(|request| request.requester_id == requester_id)
    }

    async fn list_excluding_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<ItemRequest>, RequestRepositoryError> {
        self.list_where(|request| request.requester_id != requester_id)
    }
}
