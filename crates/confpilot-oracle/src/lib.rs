//! confpilot-oracle — the language model behind the coordinator.
//!
//! The model is an opaque text-completion oracle: one prompt in, one
//! completion out. Nothing here retries, times out, or limits output.
//!
//! # Implementations
//!
//! - [`OllamaOracle`] posts to an Ollama-compatible `/api/generate` endpoint.
//! - `ScriptedOracle` replays canned completions, for tests. Enabled by the
//!   `test-util` feature.

pub mod ollama;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaOracle;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::ScriptedOracle;

/// Errors that can occur while asking the oracle for a completion.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Transport(String),

    #[error("oracle returned status {0}")]
    Status(u16),

    #[error("oracle response could not be decoded: {0}")]
    Decode(String),

    #[error("no scripted completion left for prompt")]
    Exhausted,
}

/// A text-completion service.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Complete `prompt`, returning the trimmed completion text.
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}
