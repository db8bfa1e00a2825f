//! Item request use cases.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::booking_support::{map_item_repo_error, map_user_repo_error};
use crate::domain::item_service::map_request_repo_error;
use crate::domain::ports::{ItemRepository, RequestRepository, UserRepository};
use crate::domain::{
    Error, Item, ItemRequest, NewRequest, PageRequest, RequestId, RequestView, UserId,
};

/// Item request service.
pub struct RequestService<R, U, I> {
    requests: Arc<R>,
    users: Arc<U>,
    items: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, U, I> Clone for RequestService<R, U, I> {
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            users: Arc::clone(&self.users),
            items: Arc::clone(&self.items),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, U, I> RequestService<R, U, I>
where
    R: RequestRepository,
    U: UserRepository,
    I: ItemRepository,
{
    /// Create a new request service over the given stores and clock.
    pub fn new(requests: Arc<R>, users: Arc<U>, items: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            users,
            items,
            clock,
        }
    }

    /// Post a new request on behalf of `caller`.
    pub async fn create(&self, caller: UserId, description: String) -> Result<ItemRequest, Error> {
        self.ensure_user_exists(caller).await?;
        let request = self
            .requests
            .create(NewRequest {
                description,
                requester_id: caller,
                created: self.clock.utc(),
            })
            .await
            .map_err(map_request_repo_error)?;
        info!(request_id = %request.id, requester_id = %caller, "request created");
        Ok(request)
    }

    /// The caller's own requests with their answering items, newest first.
    pub async fn list_own(&self, caller: UserId) -> Result<Vec<RequestView>, Error> {
        self.ensure_user_exists(caller).await?;
        let requests = self
            .requests
            .list_by_requester(caller)
            .await
            .map_err(map_request_repo_error)?;
        self.with_items(requests).await
    }

    /// Requests posted by other users, newest first, paginated.
    pub async fn list_others(
        &self,
        caller: UserId,
        page: PageRequest,
    ) -> Result<Vec<RequestView>, Error> {
        self.ensure_user_exists(caller).await?;
        let requests = self
            .requests
            .list_excluding_requester(caller)
            .await
            .map_err(map_request_repo_error)?;
        self.with_items(page.slice(requests)).await
    }

    /// Fetch one request with its answering items.
    pub async fn get_by_id(
        &self,
        caller: UserId,
        request_id: RequestId,
    ) -> Result<RequestView, Error> {
        self.ensure_user_exists(caller).await?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await
            .map_err(map_request_repo_error)?
            .ok_or_else(|| Error::not_found(format!("request {request_id} not found")))?;
        let mut views = self.with_items(vec![request]).await?;
        // with_items preserves its input length.
        views
            .pop()
            .ok_or_else(|| Error::internal("request join produced no view"))
    }

    async fn with_items(&self, requests: Vec<ItemRequest>) -> Result<Vec<RequestView>, Error> {
        let ids: Vec<RequestId> = requests.iter().map(|r| r.id).collect();
        let items = self
            .items
            .list_by_request_ids(&ids)
            .await
            .map_err(map_item_repo_error)?;

        let mut by_request: HashMap<RequestId, Vec<Item>> = HashMap::new();
        for item in items {
            if let Some(request_id) = item.request_id {
                by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = by_request.remove(&request.id).unwrap_or_default();
                RequestView { request, items }
            })
            .collect())
    }

    async fn ensure_user_exists(&self, id: UserId) -> Result<(), Error> {
        let exists = self
            .users
            .exists_by_id(id)
            .await
            .map_err(map_user_repo_error)?;
        if exists {
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }
}

#[cfg(test)]
#[path = "request_service_tests.rs"]
mod tests;
