//! PostDetailView - one post by slug with its table of contents and related posts.

use std::sync::Arc;

use serde::Serialize;

use super::content_store::ContentStore;
use crate::domain::{Post, TocEntry, catalog, text};
use crate::ports::{Cache, content_key};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub toc: Vec<TocEntry>,
    pub related: Vec<Post>,
}

pub struct PostDetailView {
    store: Arc<ContentStore>,
    cache: Option<Arc<dyn Cache>>,
}

impl PostDetailView {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store, cache: None }
    }

    /// Memoise tables of contents in `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The post behind `slug`, or `None` when it does not exist.
    pub async fn load(&self, slug: &str) -> Option<PostDetail> {
        let post = self.store.get_post_by_slug(slug).await?;
        let toc = self.table_of_contents(&post.content).await;
        let all = self.store.list_posts().await;
        let related = catalog::related_posts(&all, &post);

        Some(PostDetail { post, toc, related })
    }

    /// Table of contents for `content`, served from the cache when possible.
    pub async fn table_of_contents(&self, content: &str) -> Vec<TocEntry> {
        let Some(cache) = &self.cache else {
            return text::table_of_contents(content);
        };

        let key = content_key("toc", content);
        if let Some(hit) = cache.get(&key).await {
            match serde_json::from_str(&hit) {
                Ok(toc) => return toc,
                Err(e) => tracing::warn!(error = %e, "Discarding unreadable cached toc"),
            }
        }

        let toc = text::table_of_contents(content);
        match serde_json::to_string(&toc) {
            Ok(encoded) => {
                if let Err(e) = cache.set(&key, &encoded, None).await {
                    tracing::warn!(error = %e, "Failed to cache toc");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode toc"),
        }
        toc
    }
}
