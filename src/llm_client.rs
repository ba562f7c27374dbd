//! LLM API client abstraction for OpenAI, Anthropic and Gemini.

use std::time::Duration;

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// LLM provider selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
    /// Google Gemini.
    Gemini,
}

impl LlmProvider {
    /// Environment variable holding the API key for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(
        provider: LlmProvider,
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            timeout,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Gets the HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        info!("Creating LLM client");
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        self.dispatch(system_prompt, user_message, None).await
    }

    /// Generates a JSON completion constrained by `schema`.
    ///
    /// Gemini enforces the schema server-side; the other providers rely on
    /// the prompt describing the shape.
    #[instrument(skip(self, system_prompt, user_message, schema), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate_structured(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        debug!("Generating structured completion");
        self.dispatch(system_prompt, user_message, Some(schema)).await
    }

    async fn dispatch(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&serde_json::Value>,
    ) -> Result<String, LlmError> {
        match self.config.provider {
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message).await,
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await,
            LlmProvider::Gemini => {
                self.generate_gemini(system_prompt, user_message, schema)
                    .await
            }
        }
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });

        debug!("Sending request to Anthropic");
        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::new(format!("Anthropic API request failed: {}", e)))?;

        let response_json = read_json("Anthropic", response).await?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Google Gemini in JSON response mode.
    #[instrument(skip(self, system_prompt, user_message, schema))]
    async fn generate_gemini(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&serde_json::Value>,
    ) -> Result<String, LlmError> {
        debug!("Building Gemini API request");
        let request_body =
            gemini_request_body(system_prompt, user_message, self.config.max_tokens, schema);

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.config.model
        );

        debug!("Sending request to Gemini");
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.config.api_key.clone())
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::new(format!("Gemini API request failed: {}", e)))?;

        let response_json = read_json("Gemini", response).await?;

        let content = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Gemini response");
                LlmError::new("No text content in Gemini response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using OpenAI.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key.clone()),
        );

        debug!("Building chat completion request");
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build system message: {}", e)))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build user message: {}", e)))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build request: {}", e)))?;

        debug!("Sending request to OpenAI");
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::new(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::new("No content in OpenAI response".to_string()))?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

/// Builds a Gemini `generateContent` body in JSON response mode.
fn gemini_request_body(
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
    schema: Option<&serde_json::Value>,
) -> serde_json::Value {
    let mut generation_config = serde_json::json!({
        "responseMimeType": "application/json",
        "maxOutputTokens": max_tokens
    });
    if let Some(schema) = schema {
        generation_config["responseSchema"] = schema.clone();
    }

    serde_json::json!({
        "systemInstruction": {
            "parts": [{ "text": system_prompt }]
        },
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": user_message }]
            }
        ],
        "generationConfig": generation_config
    })
}

/// Reads a response body, failing on non-success status or invalid JSON.
#[instrument(skip(response), fields(status = %response.status()))]
async fn read_json(vendor: &str, response: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| LlmError::new(format!("Failed to read {} response: {}", vendor, e)))?;

    if !status.is_success() {
        error!(status = %status, response = %response_text, "{} API error", vendor);
        return Err(LlmError::new(format!(
            "{} API error {}: {}",
            vendor, status, response_text
        )));
    }

    debug!(response_length = response_text.len(), "Parsing {} response", vendor);
    serde_json::from_str(&response_text)
        .map_err(|e| LlmError::new(format!("Failed to parse {} response: {}", vendor, e)))
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_body_carries_schema() {
        let schema = serde_json::json!({ "type": "OBJECT", "required": ["categories"] });
        let body = gemini_request_body("system", "user", 512, Some(&schema));
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["maxOutputTokens"], 512);
        assert_eq!(config["responseSchema"], schema);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
    }

    #[test]
    fn test_gemini_body_without_schema() {
        let body = gemini_request_body("system", "user", 512, None);
        assert!(body["generationConfig"].get("responseSchema").is_none());
    }
}
