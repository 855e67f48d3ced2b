//! Anthropic schema translation for the Tessera gateway
//!
//! Converts the gateway's canonical request shape into Anthropic's Text
//! Completions or Messages wire format and normalizes the provider's
//! responses back into the canonical shape. The conversions are pure and
//! synchronous; the [`provider`] module adds the routing, auth and transport
//! collaborators needed to actually call the upstream.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod route;
pub mod transform;
pub mod types;

pub use error::{DriverError, TransformError};
pub use provider::AnthropicDriver;
pub use route::{RouteType, UpstreamRoute};
pub use transform::{Outbound, from_format, to_format};
pub use types::{CanonicalRequest, CanonicalResponse, Message, ModelConfig, ModelOptions, Role, Usage};
