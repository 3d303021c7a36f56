//! Read-only projections over a post list: filtering, home curation,
//! related posts and dashboard statistics.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::post::{Post, PostCategory};
use crate::error::DomainError;

/// Featured posts shown on the home page.
pub const HOME_FEATURED_LIMIT: usize = 3;
/// Recent posts shown on the home page.
pub const HOME_RECENT_LIMIT: usize = 5;
/// Related posts shown under a post.
pub const RELATED_LIMIT: usize = 3;

/// Category selector: everything, or exactly one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PostCategory),
}

impl CategoryFilter {
    /// "All" followed by every category, in display order.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(PostCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, category: PostCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Catalog filter: category AND case-insensitive search over title, summary and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl CatalogQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        if !self.category.matches(post.category) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        post.title.to_lowercase().contains(&needle)
            || post.summary.to_lowercase().contains(&needle)
            || post.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    /// Matching posts, newest first.
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let mut result: Vec<Post> = posts.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_newest_first(&mut result);
        result
    }
}

/// Order by `date` descending. Stable, so equal dates keep store order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Home page curation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    pub featured: Vec<Post>,
    pub recent: Vec<Post>,
}

impl HomeFeed {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut sorted = posts.to_vec();
        sort_newest_first(&mut sorted);

        let featured = sorted
            .iter()
            .filter(|p| p.is_featured)
            .take(HOME_FEATURED_LIMIT)
            .cloned()
            .collect();
        sorted.truncate(HOME_RECENT_LIMIT);

        Self {
            featured,
            recent: sorted,
        }
    }
}

/// Same-category posts other than `current`, in store order, capped at [`RELATED_LIMIT`].
pub fn related_posts(all: &[Post], current: &Post) -> Vec<Post> {
    all.iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

/// Dashboard statistics, recomputed from the in-memory list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub total_posts: usize,
    pub featured_posts: usize,
    pub categories: usize,
    pub subscribers: usize,
    pub total_words: usize,
}

impl ContentStats {
    pub fn compute(posts: &[Post], subscriber_count: usize) -> Self {
        Self {
            total_posts: posts.len(),
            featured_posts: posts.iter().filter(|p| p.is_featured).count(),
            categories: posts.iter().map(|p| p.category).collect::<HashSet<_>>().len(),
            subscribers: subscriber_count,
            total_words: posts.iter().map(Post::word_count).sum(),
        }
    }
}
