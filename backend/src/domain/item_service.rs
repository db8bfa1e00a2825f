//! Item management use cases: listings, search, owner enrichment, and
//! post-booking comments.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::booking_support::{
    map_booking_repo_error, map_item_repo_error, map_user_repo_error,
};
use crate::domain::ports::{
    BookingRepository, CommentRepository, CommentRepositoryError, ItemRepository,
    RequestRepository, RequestRepositoryError, UserRepository,
};
use crate::domain::{
    Booking, BookingId, Comment, CommentView, Error, Item, ItemId, ItemUpdate, NewComment,
    NewItem, PageRequest, RequestId, User, UserId,
};

/// Reference to a neighbouring booking shown on an owner's item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRef {
    pub id: BookingId,
    pub booker_id: UserId,
}

impl From<&Booking> for BookingRef {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

/// An item joined with its comments and, for the owner, the bookings
/// adjacent to `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub item: Item,
    pub comments: Vec<CommentView>,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
}

/// Payload for listing a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<RequestId>,
}

/// Item management service.
pub struct ItemService<I, U, B, C, Q> {
    items: Arc<I>,
    users: Arc<U>,
    bookings: Arc<B>,
    comments: Arc<C>,
    requests: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<I, U, B, C, Q> Clone for ItemService<I, U, B, C, Q> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
            bookings: Arc::clone(&self.bookings),
            comments: Arc::clone(&self.comments),
            requests: Arc::clone(&self.requests),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<I, U, B, C, Q> ItemService<I, U, B, C, Q>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    Q: RequestRepository,
{
    /// Create a new item service over the given stores and clock.
    pub fn new(
        items: Arc<I>,
        users: Arc<U>,
        bookings: Arc<B>,
        comments: Arc<C>,
        requests: Arc<Q>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            items,
            users,
            bookings,
            comments,
            requests,
            clock,
        }
    }

    /// List a new item for `owner`.
    pub async fn create(&self, owner: UserId, payload: ItemPayload) -> Result<Item, Error> {
        let owner = self.find_user(owner).await?;
        if let Some(request_id) = payload.request_id {
            self.ensure_request_exists(request_id).await?;
        }

        let item = self
            .items
            .create(NewItem {
                name: payload.name,
                description: payload.description,
                available: payload.available,
                owner_id: owner.id,
                request_id: payload.request_id,
            })
            .await
            .map_err(map_item_repo_error)?;
        info!(item_id = %item.id, owner_id = %item.owner_id, "item created");
        Ok(item)
    }

    /// Apply a partial update; only the owner may update an item.
    pub async fn update(
        &self,
        caller: UserId,
        item_id: ItemId,
        update: ItemUpdate,
    ) -> Result<Item, Error> {
        let item = self.find_item(item_id).await?;
        validate_owner(&item, caller)?;
        if let Some(request_id) = update.request_id {
            self.ensure_request_exists(request_id).await?;
        }

        self.items
            .update(item_id, update)
            .await
            .map_err(map_item_repo_error)?
            .ok_or_else(|| item_not_found(item_id))
    }

    /// Remove an item; only the owner may delete it.
    pub async fn delete(&self, caller: UserId, item_id: ItemId) -> Result<(), Error> {
        let item = self.find_item(item_id).await?;
        validate_owner(&item, caller)?;
        self.items
            .delete(item_id)
            .await
            .map_err(map_item_repo_error)?;
        info!(item_id = %item_id, "item deleted");
        Ok(())
    }

    /// Fetch an item with its comments; owners additionally see the
    /// bookings adjacent to now.
    pub async fn get_by_id(&self, item_id: ItemId, caller: UserId) -> Result<ItemDetails, Error> {
        let item = self.find_item(item_id).await?;
        let comments = self.comments_for(item_id).await?;

        let (last_booking, next_booking) = if item.owner_id == caller {
            let bookings = self
                .bookings
                .list_by_item(item_id)
                .await
                .map_err(map_booking_repo_error)?;
            adjacent_bookings(&bookings, self.clock.utc())
        } else {
            (None, None)
        };

        Ok(ItemDetails {
            item,
            comments,
            last_booking,
            next_booking,
        })
    }

    /// The owner's items, id descending, each enriched with comments and
    /// adjacent bookings against a single `now`.
    pub async fn list_for_owner(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemDetails>, Error> {
        let mut items = self
            .items
            .list_by_owner(owner)
            .await
            .map_err(map_item_repo_error)?;
        items.sort_by(|a, b| b.id.cmp(&a.id));
        let items = page.slice(items);

        let now = self.clock.utc();
        let mut details = Vec::with_capacity(items.len());
        for item in items {
            let comments = self.comments_for(item.id).await?;
            let bookings = self
                .bookings
                .list_by_item(item.id)
                .await
                .map_err(map_booking_repo_error)?;
            let (last_booking, next_booking) = adjacent_bookings(&bookings, now);
            details.push(ItemDetails {
                item,
                comments,
                last_booking,
                next_booking,
            });
        }
        Ok(details)
    }

    /// Free-text search over available items. Blank text yields nothing.
    pub async fn search(&self, text: &str, page: PageRequest) -> Result<Vec<Item>, Error> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut found = self
            .items
            .search(text)
            .await
            .map_err(map_item_repo_error)?;
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(page.slice(found))
    }

    /// Leave a comment on an item the author has finished renting.
    pub async fn add_comment(
        &self,
        item_id: ItemId,
        author: UserId,
        text: String,
    ) -> Result<CommentView, Error> {
        let author = self.find_user(author).await?;
        let item = self.find_item(item_id).await?;

        let now = self.clock.utc();
        let rented = self
            .bookings
            .exists_finished(author.id, item.id, now)
            .await
            .map_err(map_booking_repo_error)?;
        if !rented {
            return Err(Error::invalid_request(format!(
                "user {} has not rented item {item_id}",
                author.id
            )));
        }

        let comment = self
            .comments
            .create(NewComment {
                item_id: item.id,
                author_id: author.id,
                text,
                created: now,
            })
            .await
            .map_err(map_comment_repo_error)?;
        info!(comment_id = %comment.id, item_id = %item_id, "comment added");
        Ok(CommentView {
            comment,
            author_name: author.name,
        })
    }

    async fn comments_for(&self, item_id: ItemId) -> Result<Vec<CommentView>, Error> {
        let comments = self
            .comments
            .list_by_item(item_id)
            .await
            .map_err(map_comment_repo_error)?;
        self.with_author_names(comments).await
    }

    async fn with_author_names(&self, comments: Vec<Comment>) -> Result<Vec<CommentView>, Error> {
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = self
                .users
                .find_by_id(comment.author_id)
                .await
                .map_err(map_user_repo_error)?
                .ok_or_else(|| {
                    Error::internal(format!(
                        "author {} missing for comment {}",
                        comment.author_id, comment.id
                    ))
                })?;
            views.push(CommentView {
                comment,
                author_name: author.name,
            });
        }
        Ok(views)
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn find_item(&self, id: ItemId) -> Result<Item, Error> {
        self.items
            .find_by_id(id)
            .await
            .map_err(map_item_repo_error)?
            .ok_or_else(|| item_not_found(id))
    }

    async fn ensure_request_exists(&self, id: RequestId) -> Result<(), Error> {
        let found = self
            .requests
            .find_by_id(id)
            .await
            .map_err(map_request_repo_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("request {id} not found"))),
        }
    }
}

fn validate_owner(item: &Item, caller: UserId) -> Result<(), Error> {
    if item.owner_id == caller {
        Ok(())
    } else {
        Err(Error::forbidden(
            "only the owner may update or delete an item",
        ))
    }
}

fn item_not_found(id: ItemId) -> Error {
    Error::not_found(format!("item {id} not found"))
}

fn map_comment_repo_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment store unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment store error: {message}"))
        }
    }
}

pub(crate) fn map_request_repo_error(error: RequestRepositoryError) -> Error {
    match error {
        RequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("request store unavailable: {message}"))
        }
        RequestRepositoryError::Query { message } => {
            Error::internal(format!("request store error: {message}"))
        }
    }
}

/// The latest booking started before `now` and the earliest started after.
fn adjacent_bookings(bookings: &[Booking], now: DateTime<Utc>) -> (Option<BookingRef>, Option<BookingRef>) {
    let last = bookings
        .iter()
        .filter(|b| b.start < now)
        .max_by_key(|b| (b.start, b.id))
        .map(BookingRef::from);
    let next = bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| (b.start, b.id))
        .map(BookingRef::from);
    (last, next)
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
