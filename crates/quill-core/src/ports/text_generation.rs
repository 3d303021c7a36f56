//! Text generation port - the external language-model service.

use async_trait::async_trait;

use crate::error::AssistError;

/// Single-shot prompt-in, text-out generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run `prompt` against `model` and return the generated text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AssistError>;
}
