use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::error::TransformError;

/// Canonical inbound request
///
/// Exactly one of `prompt` or `messages` must be set; see [`Self::input`].
/// Carries no model identity, which comes from a separate `ModelConfig`.
/// Other top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    /// Legacy single-prompt input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Chat-style ordered messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

/// The single populated input of a [`CanonicalRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestInput<'a> {
    /// Raw prompt string
    Prompt(&'a str),
    /// Ordered message list
    Messages(&'a [Message]),
}

impl CanonicalRequest {
    /// Request in single-prompt mode
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Request in chat mode
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Some(messages),
            ..Self::default()
        }
    }

    /// The populated input
    ///
    /// # Errors
    ///
    /// Returns `TransformError::MissingInput` when neither or both of
    /// `prompt` and `messages` are present.
    pub fn input(&self) -> Result<RequestInput<'_>, TransformError> {
        match (&self.prompt, &self.messages) {
            (Some(prompt), None) => Ok(RequestInput::Prompt(prompt)),
            (None, Some(messages)) => Ok(RequestInput::Messages(messages)),
            (None, None) => Err(TransformError::MissingInput("request is missing .prompt and .messages")),
            (Some(_), Some(_)) => Err(TransformError::MissingInput(
                "request must not carry both .prompt and .messages",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prompt_only_is_prompt_input() {
        let request = CanonicalRequest::from_prompt("Hello");
        assert_eq!(request.input().unwrap(), RequestInput::Prompt("Hello"));
    }

    #[test]
    fn messages_only_is_messages_input() {
        let request = CanonicalRequest::from_messages(vec![Message::user("Hi")]);
        assert!(matches!(request.input().unwrap(), RequestInput::Messages([m]) if m.content == "Hi"));
    }

    #[test]
    fn neither_input_rejected() {
        let err = CanonicalRequest::default().input().unwrap_err();
        assert!(matches!(err, TransformError::MissingInput(_)));
    }

    #[test]
    fn both_inputs_rejected() {
        let request = CanonicalRequest {
            prompt: Some("Hello".to_owned()),
            messages: Some(vec![Message::user("Hi")]),
        };
        assert!(matches!(request.input(), Err(TransformError::MissingInput(_))));
    }

    #[test]
    fn unknown_fields_ignored() {
        let raw = json!({"messages": [{"role": "user", "content": "Hi"}], "stream": false, "metadata": {"k": 1}});
        let request: CanonicalRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request, CanonicalRequest::from_messages(vec![Message::user("Hi")]));
    }

    #[test]
    fn null_prompt_reads_as_absent() {
        let request: CanonicalRequest =
            serde_json::from_value(json!({"prompt": null, "messages": [{"role": "user", "content": "Hi"}]})).unwrap();
        assert!(matches!(request.input().unwrap(), RequestInput::Messages(_)));
    }
}
