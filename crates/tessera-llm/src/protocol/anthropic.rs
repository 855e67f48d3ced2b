//! Anthropic Text Completions and Messages API wire format types

use serde::{Deserialize, Serialize};

/// Provider name used in routing keys and diagnostics
pub const PROVIDER: &str = "anthropic";

// -- Request types --

/// Outgoing request body, one variant per API generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderRequest {
    /// Text Completions API (`/v1/complete`)
    Completion(AnthropicCompletionRequest),
    /// Messages API (`/v1/messages`)
    Messages(AnthropicMessagesRequest),
}

/// Text Completions API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicCompletionRequest {
    /// Flattened `Human:`/`Assistant:` transcript
    pub prompt: String,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens_to_sample: Option<u32>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Model identifier
    pub model: String,
}

/// Messages API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessagesRequest {
    /// Conversation turns
    pub messages: Vec<AnthropicMessage>,
    /// System prompt (top-level, not in messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Model identifier
    pub model: String,
}

/// Conversation turn; the Messages API only accepts these two roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnthropicRole {
    /// Human turn
    User,
    /// Model turn
    Assistant,
}

/// Anthropic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role of the turn
    pub role: AnthropicRole,
    /// Turn text
    pub content: String,
}

// -- Response types --

/// Text Completions API response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicCompletionResponse {
    /// Generated text
    pub completion: String,
    /// Stop reason (e.g. `stop_sequence`, `max_tokens`)
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
}

/// Messages API response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicMessagesResponse {
    /// Ordered content blocks
    pub content: Vec<AnthropicContentBlock>,
    /// Stop reason (e.g. `end_turn`)
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// Token usage, when reported
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Content block in a Messages response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicContentBlock {
    /// Block kind (`text`, `tool_use`, ...)
    #[serde(default, rename = "type")]
    pub block_type: Option<String>,
    /// Text of a text block
    #[serde(default)]
    pub text: Option<String>,
}

impl AnthropicContentBlock {
    /// Text of a `text` block; an untyped block counts as text
    pub fn into_text(self) -> Option<String> {
        match self.block_type.as_deref() {
            None | Some("text") => self.text,
            Some(_) => None,
        }
    }
}

/// Anthropic token usage
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AnthropicUsage {
    /// Input tokens
    #[serde(default)]
    pub input_tokens: Option<u64>,
    /// Output tokens
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

// -- Error response --

/// Anthropic error response body
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicErrorResponse {
    /// Error details
    pub error: AnthropicErrorDetail,
}

/// Anthropic error detail
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicErrorDetail {
    /// Error type (e.g. `invalid_request_error`)
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}
