use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailAddress, Post, Subscriber};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (insert or replace by ID).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` when nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository over the `posts` table.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts ordered by creation date, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert-or-replace a batch keyed by ID.
    async fn save_many(&self, posts: Vec<Post>) -> Result<(), RepoError>;

    /// Remove every post. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;

    /// Cheap round trip used as a connectivity probe.
    async fn ping(&self) -> Result<(), RepoError>;
}

/// Subscriber repository over the `subscribers` table.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// All subscribers, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Subscriber>, RepoError>;

    /// Insert a new subscriber. A duplicate email fails with `RepoError::Constraint`.
    async fn insert(&self, email: &EmailAddress) -> Result<Subscriber, RepoError>;
}
