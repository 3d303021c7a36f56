//! Draft finalisation: turns an editor draft into a savable [`Post`].

use chrono::{DateTime, Utc};

use super::content_store::ContentStore;
use super::text_assist::TextAssist;
use crate::domain::{Post, PostDraft, text};
use crate::error::DomainError;

/// Cover image used when a draft has none.
pub fn placeholder_image(now: DateTime<Utc>) -> String {
    format!(
        "https://picsum.photos/800/400?random={}",
        now.timestamp_millis()
    )
}

/// Validate `draft` and fill in every derived field.
///
/// - slug: derived from the title when blank, normalised otherwise
/// - summary: generated through `assist` when blank, truncated content on failure
/// - image: placeholder when absent
/// - reading time and `updated_at`: recomputed
pub async fn finalize_draft(draft: PostDraft, assist: &TextAssist) -> Result<Post, DomainError> {
    draft.validate()?;
    let now = Utc::now();

    let slug = {
        let source = if draft.slug.trim().is_empty() {
            &draft.title
        } else {
            &draft.slug
        };
        let slug = text::derive_slug(source);
        if slug.is_empty() {
            format!("post-{}", &draft.id.simple().to_string()[..8])
        } else {
            slug
        }
    };

    let summary = if draft.summary.trim().is_empty() {
        assist.summarize_or_truncate(&draft.content).await
    } else {
        draft.summary
    };

    let image = draft
        .image
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| placeholder_image(now));

    let tags = draft
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let mut post = Post {
        id: draft.id,
        title: draft.title.trim().to_string(),
        slug,
        summary,
        content: draft.content,
        image: Some(image),
        category: draft.category,
        tags,
        date: draft.date,
        updated_at: now,
        is_featured: draft.is_featured,
        reading_time_minutes: 0,
    };
    post.touch(now);
    Ok(post)
}

/// Finalise `draft` and persist it.
pub async fn save_draft(
    store: &ContentStore,
    assist: &TextAssist,
    draft: PostDraft,
) -> Result<Post, DomainError> {
    let post = finalize_draft(draft, assist).await?;
    store.save_post(post).await
}
