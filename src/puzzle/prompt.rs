//! Prompt text and response parsing for LLM-generated puzzles.

use tracing::{debug, instrument};

use super::RawPuzzle;
use crate::ProviderError;

/// System prompt describing the expected JSON shape.
pub const SYSTEM_PROMPT: &str = "You design word puzzles. Reply with a single JSON object and \
nothing else, shaped as {\"categories\": [{\"name\": string, \"description\": string, \
\"items\": [string, string, string, string]}]}.";

/// Builds the user prompt for a topic.
#[instrument]
pub fn puzzle_prompt(topic: &str) -> String {
    format!(
        r#"Create a "Connections" style word puzzle based on the topic: "{topic}".

Rules:
1. Generate exactly 4 distinct categories.
2. Each category must have exactly 4 words/items that belong to it.
3. The words should be tricky; they might seem to belong to multiple categories, but there is only one correct solution where all 4x4 groups are perfect.
4. Ensure words are short and concise (max 2-3 words per item).
5. "name" is the hidden category title, "description" a short explanation of the connection.

Output JSON format."#
    )
}

/// Structured-output schema for puzzle replies.
///
/// Requires `categories[].{name, description, items}`; providers with a
/// JSON schema mode constrain the reply with it.
pub fn puzzle_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "The hidden category title"
                        },
                        "description": {
                            "type": "STRING",
                            "description": "Short explanation of the connection"
                        },
                        "items": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Exactly 4 items in this category"
                        }
                    },
                    "required": ["name", "description", "items"]
                }
            }
        },
        "required": ["categories"]
    })
}

/// Parses a model reply into a raw puzzle.
///
/// Tolerates a surrounding Markdown code fence. Shape checks (4×4) are left
/// to the assembler.
///
/// # Errors
///
/// Returns [`ProviderError`] if the reply is empty or not the expected JSON.
#[instrument(skip(text), fields(length = text.len()))]
pub fn parse_puzzle_response(text: &str) -> Result<RawPuzzle, ProviderError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ProviderError::new("Empty response from model"));
    }

    let puzzle: RawPuzzle = serde_json::from_str(body)
        .map_err(|e| ProviderError::new(format!("Invalid puzzle JSON: {}", e)))?;

    debug!(categories = puzzle.categories.len(), "Parsed puzzle response");
    Ok(puzzle)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
