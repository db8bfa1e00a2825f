//! In-memory [`ItemRepository`] adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, ItemUpdate, NewItem, RequestId, UserId};

/// Map-backed item store.
#[derive(Debug, Default)]
pub struct MemoryItemRepository {
    rows: RwLock<HashMap<i64, Item>>,
    sequence: AtomicI64,
}

impl MemoryItemRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> ItemId {
        ItemId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<i64, Item>>, ItemRepositoryError> {
        self.rows
            .read()
            .map_err(|_| ItemRepositoryError::query("item store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i64, Item>>, ItemRepositoryError> {
        self.rows
            .write()
            .map_err(|_| ItemRepositoryError::query("item store lock poisoned"))
    }
}

fn matches_text(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle) || item.description.to_lowercase().contains(needle)
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn create(&self, new_item: NewItem) -> Result<Item, ItemRepositoryError> {
        let item = Item {
            id: self.next_id(),
            name: new_item.name,
            description: new_item.description,
            available: new_item.available,
            owner_id: new_item.owner_id,
            request_id: new_item.request_id,
        };
        self.write()?.insert(item.id.value(), item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut rows = self.write()?;
        let Some(row) = rows.get_mut(&id.value()) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(description) = update.description {
            row.description = description;
        }
        if let Some(available) = update.available {
            row.available = available;
        }
        if let Some(request_id) = update.request_id {
            row.request_id = Some(request_id);
        }
        Ok(Some(row.clone()))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.read()?.get(&id.value()).cloned())
    }

    async fn delete(&self, id: ItemId) -> Result<(), ItemRepositoryError> {
        self.write()?.remove(&id.value());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut items: Vec<Item> = self
            .read()?
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    async fn search(&self, text: &str) -> Result<Vec<Item>, ItemRepositoryError> {
        let needle = text.to_lowercase();
        let mut items: Vec<Item> = self
            .read()?
            .values()
            .filter(|item| item.available && matches_text(item, &needle))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    async fn list_by_request_ids(
        &self,
        request_ids: &[RequestId],
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|item| {
                item.request_id
                    .is_some_and(|request_id| request_ids.contains(&request_id))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str, description: &str, available: bool) -> NewItem {
        NewItem {
            name: name.to_owned(),
            description: description.to_owned(),
            available,
            owner_id: UserId::new(1),
            request_id: None,
        }
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_name_and_description() {
        let store = MemoryItemRepository::new();
        store
            .create(new_item("Cordless Drill", "fast", true))
            .await
            .expect("created");
        store
            .create(new_item("ladder", "reaches the DRILL shelf", true))
            .await
            .expect("created");

        let found = store.search("dRiLl").await.expect("searched");
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn search_skips_unavailable_items() {
        let store = MemoryItemRepository::new();
        store
            .create(new_item("drill", "broken", false))
            .await
            .expect("created");

        let found = store.search("drill").await.expect("searched");
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let store = MemoryItemRepository::new();
        let item = store
            .create(new_item("drill", "cordless", true))
            .await
            .expect("created");

        let updated = store
            .update(
                item.id,
                ItemUpdate {
                    available: Some(false),
                    ..ItemUpdate::default()
                },
            )
            .await
            .expect("updated")
            .expect("exists");
        assert_eq!(updated.name, "drill");
        assert!(!updated.available);
    }

    #[tokio::test]
    async fn update_of_missing_item_is_none() {
        let store = MemoryItemRepository::new();
        let updated = store
            .update(ItemId::new(404), ItemUpdate::default())
            .await
            .expect("queried");
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn list_by_owner_orders_id_descending() {
        let store = MemoryItemRepository::new();
        for _ in 0..3 {
            store
                .create(new_item("drill", "cordless", true))
                .await
                .expect("created");
        }
        let items = store.list_by_owner(UserId::new(1)).await.expect("listed");
        let ids: Vec<i64> = items.iter().map(|i| i.id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn list_by_request_ids_returns_answering_items() {
        let store = MemoryItemRepository::new();
        store
            .create(NewItem {
                request_id: Some(RequestId::new(7)),
                ..new_item("drill", "cordless", true)
            })
            .await
            .expect("created");
        store
            .create(new_item("ladder", "tall", true))
            .await
            .expect("created");

        let items = store
            .list_by_request_ids(&[RequestId::new(7)])
            .await
            .expect("listed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].request_id, Some(RequestId::new(7)));
    }
}
