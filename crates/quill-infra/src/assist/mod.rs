//! Text generation adapters.

mod gemini;

pub use gemini::{GeminiConfig, GeminiTextGenerator};
