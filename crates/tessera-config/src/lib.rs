#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod model;
pub mod provider;
pub mod telemetry;

use indexmap::IndexMap;
use serde::Deserialize;

pub use model::*;
pub use provider::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Tessera configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Named model configurations keyed by alias
    #[serde(default)]
    pub models: IndexMap<String, ModelConfig>,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Look up a model by alias, falling back to an ad-hoc model of that name
    ///
    /// An alias that is not configured is treated as a bare upstream model
    /// name with no options.
    pub fn model(&self, alias: &str) -> ModelConfig {
        self.models
            .get(alias)
            .cloned()
            .unwrap_or_else(|| ModelConfig::named(alias))
    }
}
