//! Collaborators around the transform: transport, auth and the driver

pub mod anthropic;
pub mod auth;
pub mod transport;

pub use anthropic::AnthropicDriver;
pub use auth::AuthInjector;
pub use transport::{ReqwestTransport, Transport, UpstreamRequest, UpstreamResponse};
