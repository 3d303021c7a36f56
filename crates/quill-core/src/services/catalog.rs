//! CatalogView - read-only browsing projections over the content store.

use std::sync::Arc;

use super::content_store::ContentStore;
use crate::domain::{CatalogQuery, HomeFeed, Post};

pub struct CatalogView {
    store: Arc<ContentStore>,
}

impl CatalogView {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Posts matching `query`, newest first.
    pub async fn browse(&self, query: &CatalogQuery) -> Vec<Post> {
        let posts = self.store.list_posts().await;
        query.apply(&posts)
    }

    /// Featured and recent posts for the home page.
    pub async fn home(&self) -> HomeFeed {
        HomeFeed::from_posts(&self.store.list_posts().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFilter, PostCategory};
    use crate::testing::{FakePosts, FakeSubscribers};

    #[tokio::test]
    async fn test_browse_filters_seeded_catalog() {
        let store = Arc::new(ContentStore::new(
            Arc::new(FakePosts::default()),
            Arc::new(FakeSubscribers::default()),
        ));
        store.seed_initial_content().await.unwrap();
        let view = CatalogView::new(store.clone());

        let projects = view
            .browse(&CatalogQuery::new(CategoryFilter::Only(PostCategory::Project), ""))
            .await;
        let all = store.list_posts().await;
        let expected: Vec<_> = all
            .iter()
            .filter(|p| p.category == PostCategory::Project)
            .map(|p| p.id)
            .collect();
        assert_eq!(projects.iter().map(|p| p.id).collect::<Vec<_>>(), expected);

        let home = view.home().await;
        assert!(home.featured.iter().all(|p| p.is_featured));
        assert_eq!(home.recent.first().map(|p| p.id), all.first().map(|p| p.id));
    }

    #[tokio::test]
    async fn test_browse_on_unreachable_store_is_empty() {
        let posts = Arc::new(FakePosts::default());
        posts.fail_reads(true);
        let store = Arc::new(ContentStore::new(posts, Arc::new(FakeSubscribers::default())));
        let view = CatalogView::new(store);

        assert!(view.browse(&CatalogQuery::default()).await.is_empty());
        assert_eq!(view.home().await, HomeFeed::default());
    }
}
