//! TextAssist - summary generation and grammar fixing over a [`TextGenerator`].
//!
//! Both operations are single-shot and stateless. Output is not stable across
//! retries and nothing here retries on its own.

use std::sync::Arc;

use crate::domain::text;
use crate::error::AssistError;
use crate::ports::TextGenerator;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Content sent to the summarize prompt is cut to this many characters.
pub const SUMMARY_INPUT_CHARS: usize = 3000;

#[derive(Clone)]
pub struct TextAssist {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl TextAssist {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
        }
    }

    /// An assist with no backing credential. Every call fails with [`AssistError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            generator: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// A short synopsis of `content`.
    pub async fn summarize(&self, content: &str) -> Result<String, AssistError> {
        let summary = self.run(&summary_prompt(content)).await?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(summary.to_string())
    }

    /// `content` with spelling and grammar corrected, markdown and code fences kept.
    ///
    /// An empty answer yields `content` unchanged.
    pub async fn fix_grammar(&self, content: &str) -> Result<String, AssistError> {
        let fixed = self.run(&grammar_prompt(content)).await?;
        if fixed.trim().is_empty() {
            return Ok(content.to_string());
        }
        Ok(fixed)
    }

    /// [`summarize`](Self::summarize), falling back to truncation on any failure.
    pub async fn summarize_or_truncate(&self, content: &str) -> String {
        match self.summarize(content).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Summary generation failed, truncating content");
                text::truncate_summary(content)
            }
        }
    }

    async fn run(&self, prompt: &str) -> Result<String, AssistError> {
        let generator = self.generator.as_ref().ok_or(AssistError::Unavailable)?;
        generator.generate(&self.model, prompt).await
    }
}

impl std::fmt::Debug for TextAssist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAssist")
            .field("available", &self.is_available())
            .field("model", &self.model)
            .finish()
    }
}

fn summary_prompt(content: &str) -> String {
    let excerpt: String = content.chars().take(SUMMARY_INPUT_CHARS).collect();
    format!(
        "Write a short, search-friendly excerpt of 2-3 sentences for the following blog post. \
         Reply with the excerpt only, in the language of the post:\n\n{excerpt}"
    )
}

fn grammar_prompt(content: &str) -> String {
    format!(
        "Edit the following text for a technology blog in a professional tone. Fix spelling \
         and grammar and improve the flow, but keep technical terms, code blocks and Markdown \
         formatting exactly as they are. Reply with the corrected text only:\n\n{content}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGenerator;

    #[tokio::test]
    async fn test_disabled_assist_is_unavailable() {
        let assist = TextAssist::disabled();
        assert!(!assist.is_available());
        assert!(matches!(assist.summarize("x").await, Err(AssistError::Unavailable)));
        assert!(matches!(assist.fix_grammar("x").await, Err(AssistError::Unavailable)));
    }

    #[tokio::test]
    async fn test_summarize_trims_reply_and_caps_input() {
        let generator = Arc::new(ScriptedGenerator::replying(vec![Ok("  A summary. \n".into())]));
        let assist = TextAssist::new(generator.clone(), DEFAULT_MODEL);

        let long = "x".repeat(SUMMARY_INPUT_CHARS + 500);
        assert_eq!(assist.summarize(&long).await.unwrap(), "A summary.");

        let prompt = &generator.prompts()[0];
        assert!(prompt.ends_with(&"x".repeat(SUMMARY_INPUT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(SUMMARY_INPUT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_blank_summary_is_an_error() {
        let generator = Arc::new(ScriptedGenerator::replying(vec![Ok("   ".into())]));
        let assist = TextAssist::new(generator, DEFAULT_MODEL);
        assert!(matches!(assist.summarize("body").await, Err(AssistError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_summarize_or_truncate_falls_back() {
        let generator = Arc::new(ScriptedGenerator::replying(vec![Err(AssistError::Upstream(
            "503".into(),
        ))]));
        let assist = TextAssist::new(generator, DEFAULT_MODEL);
        let content = "a".repeat(400);

        let summary = assist.summarize_or_truncate(&content).await;
        assert_eq!(summary, format!("{}...", "a".repeat(150)));
    }

    #[tokio::test]
    async fn test_fix_grammar_keeps_original_on_empty_reply() {
        let generator = Arc::new(ScriptedGenerator::replying(vec![
            Ok("Fixed text.".into()),
            Ok("".into()),
        ]));
        let assist = TextAssist::new(generator.clone(), DEFAULT_MODEL);

        assert_eq!(assist.fix_grammar("fixd txt").await.unwrap(), "Fixed text.");
        assert_eq!(assist.fix_grammar("keep me").await.unwrap(), "keep me");
        assert!(generator.prompts()[0].contains("Markdown"));
    }
}
