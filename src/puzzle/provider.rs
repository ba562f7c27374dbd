//! Puzzle providers: where raw puzzles come from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{
    RawPuzzle, SYSTEM_PROMPT, parse_puzzle_response, puzzle_prompt, puzzle_response_schema,
};
use crate::{LlmClient, ProviderError};

/// Source of raw puzzles for a topic.
///
/// Implementations may suspend; the game core treats the result as opaque
/// and validates its shape itself.
#[async_trait]
pub trait PuzzleProvider: Send + Sync {
    /// Produces a puzzle for `topic`.
    async fn generate(&self, topic: &str) -> Result<RawPuzzle, ProviderError>;
}

/// Generates puzzles by prompting an LLM.
#[derive(Debug, Clone)]
pub struct LlmPuzzleProvider {
    client: LlmClient,
}

impl LlmPuzzleProvider {
    /// Wraps an LLM client.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PuzzleProvider for LlmPuzzleProvider {
    #[instrument(skip(self), fields(model = %self.client.config().model()))]
    async fn generate(&self, topic: &str) -> Result<RawPuzzle, ProviderError> {
        info!("Requesting puzzle from LLM");
        let reply = self
            .client
            .generate_structured(
                SYSTEM_PROMPT,
                &puzzle_prompt(topic),
                &puzzle_response_schema(),
            )
            .await?;
        parse_puzzle_response(&reply)
    }
}

/// Serves a fixed puzzle from a JSON file, ignoring the topic.
#[derive(Debug, Clone)]
pub struct FilePuzzleProvider {
    path: PathBuf,
}

impl FilePuzzleProvider {
    /// Creates a provider reading from `path` on every request.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PuzzleProvider for FilePuzzleProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn generate(&self, topic: &str) -> Result<RawPuzzle, ProviderError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ProviderError::new(format!(
                "Failed to read puzzle file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        info!("Loaded puzzle from file");
        parse_puzzle_response(&text)
    }
}
