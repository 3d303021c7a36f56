//! ContentStore - typed access to posts and subscribers.
//!
//! Reads degrade to empty results when the row store faults; the fault is
//! logged. Writes always propagate their failure so authored content is
//! never lost silently.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{EmailAddress, Post, Subscriber, seed, text};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, SubscriberRepository};

/// Result of a subscribe request. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    AlreadySubscribed,
}

pub struct ContentStore {
    posts: Arc<dyn PostRepository>,
    subscribers: Arc<dyn SubscriberRepository>,
}

impl ContentStore {
    pub fn new(posts: Arc<dyn PostRepository>, subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { posts, subscribers }
    }

    /// All posts, newest first. Empty when the store is empty or unreachable.
    pub async fn list_posts(&self) -> Vec<Post> {
        match self.posts.list_newest_first().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list posts");
                Vec::new()
            }
        }
    }

    /// The post with `slug`, if any. Store faults read as absent.
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        match self.posts.find_by_slug(slug).await {
            Ok(post) => post,
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "Failed to fetch post by slug");
                None
            }
        }
    }

    /// Insert or replace `post` keyed by its id.
    ///
    /// `updated_at` and the reading time are recomputed here regardless of
    /// what the caller filled in. When a row with the same id exists its
    /// `date` is kept.
    pub async fn save_post(&self, mut post: Post) -> Result<Post, DomainError> {
        if post.title.trim().is_empty() || post.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "title and content are required".to_string(),
            ));
        }
        if post.slug.trim().is_empty() {
            post.slug = text::derive_slug(&post.title);
        }
        let id = post.id;
        let stored = self.posts.find_by_id(id).await.map_err(|e| {
            tracing::error!(post_id = %id, error = %e, "Failed to load post before save");
            DomainError::from(e)
        })?;
        if let Some(stored) = stored {
            post.date = stored.date;
        }
        post.touch(Utc::now());

        let saved = self.posts.save(post).await.map_err(|e| {
            tracing::error!(post_id = %id, error = %e, "Failed to save post");
            DomainError::from(e)
        })?;

        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post saved");
        Ok(saved)
    }

    /// Remove one post. Unknown ids are a no-op.
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        match self.posts.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => {
                tracing::debug!(post_id = %id, "Delete of unknown post ignored");
                Ok(())
            }
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Failed to delete post");
                Err(e.into())
            }
        }
    }

    /// Remove every post. Irreversible.
    pub async fn delete_all_posts(&self) -> Result<u64, DomainError> {
        let removed = self.posts.delete_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to delete all posts");
            DomainError::from(e)
        })?;
        tracing::warn!(removed, "All posts deleted");
        Ok(removed)
    }

    /// All subscribers, newest first. Empty on store faults.
    pub async fn list_subscribers(&self) -> Vec<Subscriber> {
        match self.subscribers.list_newest_first().await {
            Ok(subscribers) => subscribers,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list subscribers");
                Vec::new()
            }
        }
    }

    /// Subscribe `email`. Subscribing twice is not an error.
    pub async fn add_subscriber(&self, email: &str) -> Result<SubscribeOutcome, DomainError> {
        let email = EmailAddress::parse(email)?;

        match self.subscribers.insert(&email).await {
            Ok(_) => {
                tracing::info!(email = %email.masked(), "Subscriber added");
                Ok(SubscribeOutcome::Created)
            }
            Err(RepoError::Constraint(_)) => {
                tracing::debug!(email = %email.masked(), "Already subscribed");
                Ok(SubscribeOutcome::AlreadySubscribed)
            }
            Err(e) => {
                tracing::error!(email = %email.masked(), error = %e, "Failed to add subscriber");
                Err(e.into())
            }
        }
    }

    /// Insert-or-replace the built-in sample set.
    pub async fn seed_initial_content(&self) -> Result<usize, DomainError> {
        let samples = seed::sample_posts(Utc::now());
        let count = samples.len();
        self.posts.save_many(samples).await.map_err(|e| {
            tracing::error!(error = %e, "Seeding sample content failed");
            DomainError::from(e)
        })?;
        tracing::info!(count, "Seeded sample content");
        Ok(count)
    }

    /// List posts, seeding the sample set first when the store is empty.
    ///
    /// A failed seed is logged and the (empty) list is returned.
    pub async fn list_posts_seeding_if_empty(&self) -> Vec<Post> {
        let posts = self.list_posts().await;
        if !posts.is_empty() {
            return posts;
        }

        tracing::info!("No posts found, loading sample content");
        match self.seed_initial_content().await {
            Ok(_) => self.list_posts().await,
            Err(_) => posts,
        }
    }

    /// Whether the row store answers a minimal query.
    pub async fn test_connection(&self) -> bool {
        match self.posts.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store connectivity probe failed");
                false
            }
        }
    }

    pub fn estimate_reading_time(content: &str) -> u32 {
        text::estimate_reading_time(content)
    }

    pub fn derive_slug(title: &str) -> String {
        text::derive_slug(title)
    }
}
