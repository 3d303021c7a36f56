//! Pure derivation rules over post text: slugs, reading time, summaries
//! and the table of contents.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of characters kept by the truncation summary fallback.
pub const SUMMARY_PREFIX_CHARS: usize = 150;

/// Appended to a truncated summary.
pub const ELLIPSIS: &str = "...";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").expect("heading pattern is valid"));

/// Whitespace-delimited token count.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes needed to read `content`, rounded up. Blank content reads in zero minutes.
pub fn estimate_reading_time(content: &str) -> u32 {
    let words = word_count(content);
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Transliterate a title into a URL-safe slug.
///
/// Lower-cases, folds diacritics to ASCII, collapses every run of
/// non-alphanumerics into a single `-` and trims separators at both ends.
pub fn derive_slug(title: &str) -> String {
    let folded = deunicode::deunicode(title).to_lowercase();

    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Summary fallback: the first [`SUMMARY_PREFIX_CHARS`] characters plus [`ELLIPSIS`].
pub fn truncate_summary(content: &str) -> String {
    let mut summary: String = content.chars().take(SUMMARY_PREFIX_CHARS).collect();
    summary.push_str(ELLIPSIS);
    summary
}

/// One heading in a post's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id, derived from the heading text with [`derive_slug`].
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Collect level 1-3 markdown headings in document order.
///
/// Lines inside fenced code blocks are ignored.
pub fn table_of_contents(content: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING.captures(line.trim_end()) {
            let text = caps[2].trim().to_string();
            if text.is_empty() {
                continue;
            }
            entries.push(TocEntry {
                id: derive_slug(&text),
                level: caps[1].len() as u8,
                text,
            });
        }
    }

    entries
}
