//! Canonical, provider-agnostic request and response types
//!
//! These are the gateway-internal shapes that the Anthropic wire formats
//! convert to and from.

pub mod message;
pub mod request;
pub mod response;

pub use message::{Message, Role};
pub use request::{CanonicalRequest, RequestInput};
pub use response::{
    CHAT_OBJECT, CanonicalResponse, Choice, ChoiceMessage, ChoiceOutput, NO_USAGE_SENTINEL, TEXT_COMPLETION_OBJECT,
    TokenCounts, Usage,
};
pub use tessera_config::{ModelConfig, ModelOptions};
