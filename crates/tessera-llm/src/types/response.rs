use serde::{Deserialize, Serialize};

/// `object` tag of a canonical chat response
pub const CHAT_OBJECT: &str = "chat.content";

/// `object` tag of a canonical text completion response
pub const TEXT_COMPLETION_OBJECT: &str = "text_completion";

/// Value emitted in place of usage counts when upstream reports none
pub const NO_USAGE_SENTINEL: &str = "no usage data returned from upstream";

/// Token accounting for a response
///
/// `NotReported` is distinct from zero usage and serializes as
/// [`NO_USAGE_SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "UsageRepr", try_from = "UsageRepr")]
pub enum Usage {
    /// Counts as reported by upstream
    Reported(TokenCounts),
    /// Upstream returned no usage block
    NotReported,
}

/// Canonical token counts
///
/// Each count is present only if upstream supplied it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    /// Tokens consumed by the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    /// Tokens generated in the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    /// Sum of the two, only when both are known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl TokenCounts {
    /// Build counts, deriving the total only from two known components
    pub fn from_parts(prompt_tokens: Option<u64>, completion_tokens: Option<u64>) -> Self {
        let total_tokens = prompt_tokens
            .zip(completion_tokens)
            .and_then(|(prompt, completion)| prompt.checked_add(completion));

        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum UsageRepr {
    Counts(TokenCounts),
    Note(String),
}

impl From<Usage> for UsageRepr {
    fn from(usage: Usage) -> Self {
        match usage {
            Usage::Reported(counts) => Self::Counts(counts),
            Usage::NotReported => Self::Note(NO_USAGE_SENTINEL.to_owned()),
        }
    }
}

impl TryFrom<UsageRepr> for Usage {
    type Error = String;

    fn try_from(repr: UsageRepr) -> Result<Self, Self::Error> {
        match repr {
            UsageRepr::Counts(counts) => Ok(Self::Reported(counts)),
            UsageRepr::Note(note) if note == NO_USAGE_SENTINEL => Ok(Self::NotReported),
            UsageRepr::Note(note) => Err(format!("unexpected usage value: {note}")),
        }
    }
}

/// Generated output of a choice: a chat message or raw completion text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceOutput {
    /// Chat-style assistant message
    Message(ChoiceMessage),
    /// Completion-style text
    Text(String),
}

/// Message content within a response choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Role is always assistant for completions
    pub role: String,
    /// Text content
    pub content: String,
}

impl ChoiceMessage {
    /// Assistant message with the given text
    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant".to_owned(),
            content,
        }
    }
}

/// A single completion choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Index of this choice
    pub index: u32,
    /// `message` or `text`, depending on the route
    #[serde(flatten)]
    pub output: ChoiceOutput,
    /// Upstream stop reason, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Canonical response emitted to gateway callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    /// Generated choices
    pub choices: Vec<Choice>,
    /// Token usage; absent for text completions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Model reported by upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Object type (`chat.content` or `text_completion`)
    pub object: String,
}

impl CanonicalResponse {
    /// Single-choice chat response
    pub fn chat(content: String, finish_reason: Option<String>, model: Option<String>, usage: Usage) -> Self {
        Self {
            choices: vec![Choice {
                index: 0,
                output: ChoiceOutput::Message(ChoiceMessage::assistant(content)),
                finish_reason,
            }],
            usage: Some(usage),
            model,
            object: CHAT_OBJECT.to_owned(),
        }
    }

    /// Single-choice text completion response
    pub fn text_completion(text: String, finish_reason: Option<String>, model: Option<String>) -> Self {
        Self {
            choices: vec![Choice {
                index: 0,
                output: ChoiceOutput::Text(text),
                finish_reason,
            }],
            usage: None,
            model,
            object: TEXT_COMPLETION_OBJECT.to_owned(),
        }
    }
}
