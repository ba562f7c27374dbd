//! Game configuration loaded from TOML.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::game::MAX_LIVES;
use crate::llm_client::{LlmConfig, LlmProvider};

/// Topics offered when the configuration does not list any.
pub const DEFAULT_TOPICS: [&str; 7] = [
    "General Knowledge",
    "Pop Culture",
    "Science & Nature",
    "Food & Drink",
    "History",
    "Technology",
    "Literature",
];

/// Settings for a game session and its puzzle provider.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gemini-2.5-flash", "gpt-4o-mini").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Seconds before a puzzle request is abandoned.
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,

    /// Mistakes allowed per puzzle.
    #[serde(default = "default_max_lives")]
    max_lives: u8,

    /// Topic used until the player picks another.
    #[serde(default = "default_topic")]
    default_topic: String,

    /// Topics offered to the player.
    #[serde(default = "default_topics")]
    topics: Vec<String>,
}

#[instrument]
fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

#[instrument]
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

#[instrument]
fn default_max_tokens() -> u32 {
    1024
}

#[instrument]
fn default_timeout_secs() -> u64 {
    60
}

#[instrument]
fn default_max_lives() -> u8 {
    MAX_LIVES
}

#[instrument]
fn default_topic() -> String {
    DEFAULT_TOPICS[0].to_string()
}

#[instrument]
fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            request_timeout_secs: default_timeout_secs(),
            max_lives: default_max_lives(),
            default_topic: default_topic(),
            topics: default_topics(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// A zero `max_lives` is raised to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on invalid TOML.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.max_lives == 0 {
            warn!("max_lives of 0 raised to 1");
            config.max_lives = 1;
        }
        if config.topics.is_empty() {
            config.topics = default_topics();
        }

        info!(provider = %config.llm_provider, model = %config.llm_model, "Config loaded");
        Ok(config)
    }

    /// Returns a copy with a different starting topic.
    pub fn with_default_topic(mut self, topic: impl Into<String>) -> Self {
        self.default_topic = topic.into();
        self
    }

    /// Creates LLM configuration for the selected provider.
    ///
    /// Reads the API key from `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` or
    /// `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key variable is not set.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
            Duration::from_secs(self.request_timeout_secs),
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
