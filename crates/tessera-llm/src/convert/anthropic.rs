//! Conversion between canonical types and Anthropic wire format

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::TransformError;
use crate::protocol::anthropic::{
    AnthropicCompletionRequest, AnthropicCompletionResponse, AnthropicContentBlock, AnthropicMessage,
    AnthropicMessagesRequest, AnthropicMessagesResponse, AnthropicRole, PROVIDER,
};
use crate::route::RouteType;
use crate::types::{CanonicalRequest, CanonicalResponse, Message, ModelConfig, RequestInput, Role, TokenCounts, Usage};

const HUMAN_PREFIX: &str = "Human: ";
const ASSISTANT_PREFIX: &str = "Assistant: ";
const TURN_SEPARATOR: &str = "\n\n";
/// Trailing marker that opens the model's turn
const ASSISTANT_CUE: &str = "Assistant:";

// -- Outbound: canonical request -> Anthropic wire format --

/// Flatten a message list into a `Human:`/`Assistant:` transcript
///
/// System messages are emitted without a prefix. Every turn is followed by a
/// blank line and the transcript ends with a bare `Assistant:` cue.
pub fn flatten_messages(messages: &[Message]) -> String {
    let mut prompt = String::new();

    for message in messages {
        match message.role {
            Role::User => prompt.push_str(HUMAN_PREFIX),
            Role::Assistant => prompt.push_str(ASSISTANT_PREFIX),
            Role::System => {}
        }
        prompt.push_str(&message.content);
        prompt.push_str(TURN_SEPARATOR);
    }

    prompt.push_str(ASSISTANT_CUE);
    prompt
}

/// Wrap a raw prompt as a single human turn
pub fn wrap_prompt(prompt: &str) -> String {
    format!("{HUMAN_PREFIX}{prompt}{TURN_SEPARATOR}{ASSISTANT_CUE}")
}

/// Build the legacy completion prompt from either request input
pub fn to_prompt(request: &CanonicalRequest) -> Result<String, TransformError> {
    Ok(match request.input()? {
        RequestInput::Prompt(prompt) => wrap_prompt(prompt),
        RequestInput::Messages(messages) => flatten_messages(messages),
    })
}

/// Conversation turns with the system instruction held apart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitMessages {
    /// User and assistant turns in input order
    pub turns: Vec<AnthropicMessage>,
    /// System instruction, if any message carried one
    pub system: Option<String>,
}

/// Partition messages into turns and a single system instruction
///
/// When several system messages appear the last one wins and earlier ones
/// are dropped.
pub fn split_messages(messages: &[Message]) -> SplitMessages {
    let mut split = SplitMessages::default();

    for message in messages {
        let role = match message.role {
            Role::User => AnthropicRole::User,
            Role::Assistant => AnthropicRole::Assistant,
            Role::System => {
                if split.system.is_some() {
                    tracing::debug!(provider = PROVIDER, "replacing earlier system instruction");
                }
                split.system = Some(message.content.clone());
                continue;
            }
        };

        split.turns.push(AnthropicMessage {
            role,
            content: message.content.clone(),
        });
    }

    split
}

/// Split the request's message list; a prompt-only request is rejected
pub fn to_messages(request: &CanonicalRequest) -> Result<SplitMessages, TransformError> {
    match request.input()? {
        RequestInput::Messages(messages) => Ok(split_messages(messages)),
        RequestInput::Prompt(_) => Err(TransformError::MissingInput("request is missing .messages")),
    }
}

/// Build a Messages API request
///
/// `temperature` and `max_tokens` are copied from the model options only
/// when set.
pub fn build_messages_request(
    request: &CanonicalRequest,
    model: &ModelConfig,
) -> Result<AnthropicMessagesRequest, TransformError> {
    let SplitMessages { turns, system } = to_messages(request)?;

    Ok(AnthropicMessagesRequest {
        messages: turns,
        system,
        max_tokens: model.max_tokens(),
        temperature: model.temperature(),
        model: model.name.clone(),
    })
}

/// Build a Text Completions API request
pub fn build_completion_request(
    request: &CanonicalRequest,
    model: &ModelConfig,
) -> Result<AnthropicCompletionRequest, TransformError> {
    Ok(AnthropicCompletionRequest {
        prompt: to_prompt(request)?,
        max_tokens_to_sample: model.max_tokens(),
        temperature: model.temperature(),
        model: model.name.clone(),
    })
}

// -- Inbound: Anthropic wire format -> canonical response --

/// Normalize a Messages API response body
///
/// Text blocks are joined with `\n` in order. Usage is remapped when
/// present, otherwise the response carries [`Usage::NotReported`].
pub fn normalize_messages_response(body: &[u8]) -> Result<CanonicalResponse, TransformError> {
    let route = RouteType::Chat;
    let response: AnthropicMessagesResponse = decode_with_field(body, route, "content")?;

    let blocks = response.content.len();
    let text = response
        .content
        .into_iter()
        .filter_map(AnthropicContentBlock::into_text)
        .collect::<Vec<_>>();

    if text.len() < blocks {
        tracing::debug!(
            provider = PROVIDER,
            route = %route,
            skipped = blocks - text.len(),
            "ignoring non-text content blocks"
        );
    }

    let usage = response.usage.map_or(Usage::NotReported, |usage| {
        Usage::Reported(TokenCounts::from_parts(usage.input_tokens, usage.output_tokens))
    });

    Ok(CanonicalResponse::chat(
        text.join("\n"),
        response.stop_reason,
        response.model,
        usage,
    ))
}

/// Normalize a Text Completions API response body
pub fn normalize_completion_response(body: &[u8]) -> Result<CanonicalResponse, TransformError> {
    let response: AnthropicCompletionResponse = decode_with_field(body, RouteType::Completions, "completion")?;

    Ok(CanonicalResponse::text_completion(
        response.completion,
        response.stop_reason,
        response.model,
    ))
}

/// Decode `body`, check the discriminating `field`, then read it as `T`
///
/// Each stage has its own error: invalid JSON is `Decode`, an absent or null
/// field is `MissingField`, and a field of the wrong type is `Normalization`.
fn decode_with_field<T: DeserializeOwned>(
    body: &[u8],
    route: RouteType,
    field: &'static str,
) -> Result<T, TransformError> {
    let value: Value = serde_json::from_slice(body).map_err(|source| TransformError::Decode {
        provider: PROVIDER,
        route,
        source,
    })?;

    let Value::Object(object) = value else {
        return Err(normalization_fault(route, "expected a JSON object"));
    };

    if !has_field(&object, field) {
        return Err(TransformError::MissingField {
            provider: PROVIDER,
            route,
            field,
        });
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| normalization_fault(route, e))
}

fn has_field(object: &Map<String, Value>, field: &str) -> bool {
    object.get(field).is_some_and(|value| !value.is_null())
}

fn normalization_fault(route: RouteType, reason: impl ToString) -> TransformError {
    TransformError::Normalization {
        provider: PROVIDER,
        route,
        reason: reason.to_string(),
    }
}
