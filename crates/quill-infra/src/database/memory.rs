//! In-memory row store - used when no `DATABASE_URL` is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{EmailAddress, Post, Subscriber};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, SubscriberRepository};

/// Posts keyed by id, with the same unique-slug rule as the `posts` table.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert(rows: &mut HashMap<Uuid, Post>, post: Post) -> Result<(), RepoError> {
        if rows.values().any(|p| p.slug == post.slug && p.id != post.id) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint on slug \"{}\"",
                post.slug
            )));
        }
        rows.insert(post.id, post);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        Self::upsert(&mut rows, entity.clone())?;
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.rows.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn save_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        // A conflicting batch leaves the store untouched.
        let mut staged = rows.clone();
        for post in posts {
            Self::upsert(&mut staged, post)?;
        }
        *rows = staged;
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubscriberRepository {
    rows: RwLock<Vec<Subscriber>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn list_newest_first(&self) -> Result<Vec<Subscriber>, RepoError> {
        let mut subscribers = self.rows.read().await.clone();
        subscribers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subscribers)
    }

    async fn insert(&self, email: &EmailAddress) -> Result<Subscriber, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|s| s.email == email.as_str()) {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint on email".to_string(),
            ));
        }

        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.as_str().to_string(),
            created_at: Utc::now(),
        };
        rows.push(subscriber.clone());
        Ok(subscriber)
    }
}
