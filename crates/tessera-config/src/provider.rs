use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Anthropic API version header value
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Upstream provider settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Base URL override (scheme, host and port; route paths are appended)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// API version used when a model does not set its own
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout (e.g. "30s", "2m")
    #[serde(default)]
    pub timeout: Option<String>,
    /// Credentials injected into every upstream request
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_version: default_api_version(),
            timeout: None,
            auth: None,
        }
    }
}

impl ProviderConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout string is not a valid duration
    pub fn timeout_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid provider timeout '{raw}': {e}")))
            .transpose()
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

/// Upstream credentials, as a header and/or a query parameter
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Header name (e.g. `x-api-key`)
    #[serde(default)]
    pub header_name: Option<String>,
    /// Header value
    #[serde(default)]
    pub header_value: Option<SecretString>,
    /// Query parameter name
    #[serde(default)]
    pub param_name: Option<String>,
    /// Query parameter value
    #[serde(default)]
    pub param_value: Option<SecretString>,
}
