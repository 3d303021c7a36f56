use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text;
use crate::error::DomainError;

/// The closed set of post categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PostCategory {
    #[default]
    Article,
    DevLog,
    Project,
}

impl PostCategory {
    /// All categories in display order.
    pub const ALL: [PostCategory; 3] = [
        PostCategory::Article,
        PostCategory::DevLog,
        PostCategory::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Article => "Article",
            PostCategory::DevLog => "DevLog",
            PostCategory::Project => "Project",
        }
    }

    /// Lenient parse for labels read back from the row store.
    ///
    /// Accepts the legacy labels `Makale` and `Proje`. Unknown labels map to
    /// [`PostCategory::Article`].
    pub fn from_stored(label: &str) -> Self {
        match label {
            "Article" | "Makale" => PostCategory::Article,
            "DevLog" => PostCategory::DevLog,
            "Project" | "Proje" => PostCategory::Project,
            other => {
                tracing::warn!(category = %other, "Unknown stored category, using Article");
                PostCategory::Article
            }
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Validation(format!("Unknown category: {s}")))
    }
}

/// Post entity - a published or draft blog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub image: Option<String>,
    pub category: PostCategory,
    pub tags: Vec<String>,
    /// Creation/publish instant. Set once, never touched by edits.
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_featured: bool,
    pub reading_time_minutes: u32,
}

impl Post {
    /// Refresh the write-path derived fields: `updated_at` and reading time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.reading_time_minutes = text::estimate_reading_time(&self.content);
    }

    pub fn word_count(&self) -> usize {
        text::word_count(&self.content)
    }
}

/// An in-progress post in the admin editor.
///
/// Unlike [`Post`], any field except `id` and `date` may still be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: PostCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_featured: bool,
}

impl PostDraft {
    /// Blank draft with a fresh id, the current timestamp and the default category.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            slug: String::new(),
            summary: String::new(),
            content: String::new(),
            image: None,
            category: PostCategory::default(),
            tags: Vec::new(),
            date: Utc::now(),
            is_featured: false,
        }
    }

    /// Check the fields required for a save.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{} must not be empty",
                missing.join(" and ")
            )))
        }
    }
}

impl Default for PostDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Post> for PostDraft {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            content: post.content,
            image: post.image,
            category: post.category,
            tags: post.tags,
            date: post.date,
            is_featured: post.is_featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_strict() {
        assert_eq!("devlog".parse::<PostCategory>().unwrap(), PostCategory::DevLog);
        assert_eq!(" Project ".parse::<PostCategory>().unwrap(), PostCategory::Project);
        assert!("Makale".parse::<PostCategory>().is_err());
        assert!("".parse::<PostCategory>().is_err());
    }

    #[test]
    fn test_category_from_stored_accepts_legacy_labels() {
        assert_eq!(PostCategory::from_stored("Makale"), PostCategory::Article);
        assert_eq!(PostCategory::from_stored("Proje"), PostCategory::Project);
        assert_eq!(PostCategory::from_stored("DevLog"), PostCategory::DevLog);
        assert_eq!(PostCategory::from_stored("Recipes"), PostCategory::Article);
    }

    #[test]
    fn test_new_draft_is_blank() {
        let draft = PostDraft::new();
        assert!(draft.title.is_empty());
        assert!(draft.content.is_empty());
        assert_eq!(draft.category, PostCategory::Article);
        assert!(!draft.is_featured);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut draft = PostDraft::new();
        let err = draft.validate().unwrap_err().to_string();
        assert!(err.contains("title and content"));

        draft.title = "Hello".to_string();
        draft.content = "   ".to_string();
        let err = draft.validate().unwrap_err().to_string();
        assert!(err.contains("content"));
        assert!(!err.contains("title"));

        draft.content = "Body".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_touch_recomputes_reading_time() {
        let draft = PostDraft {
            title: "T".to_string(),
            content: "word ".repeat(401),
            ..PostDraft::new()
        };
        let mut post = Post {
            id: draft.id,
            title: draft.title,
            slug: "t".to_string(),
            summary: String::new(),
            content: draft.content,
            image: None,
            category: draft.category,
            tags: vec![],
            date: draft.date,
            updated_at: draft.date,
            is_featured: false,
            reading_time_minutes: 0,
        };
        let later = draft.date + chrono::Duration::seconds(5);
        post.touch(later);
        assert_eq!(post.reading_time_minutes, 3);
        assert_eq!(post.updated_at, later);
        assert_eq!(post.date, draft.date);
    }
}
