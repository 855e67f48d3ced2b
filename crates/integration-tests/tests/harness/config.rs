//! Programmatic provider configuration for integration tests

use secrecy::SecretString;
use tessera_config::{AuthConfig, ProviderConfig};

/// Builder for provider configurations pointed at a mock upstream
pub struct ProviderBuilder {
    config: ProviderConfig,
}

impl ProviderBuilder {
    /// Provider with the given base URL and default version
    pub fn new(base_url: &str) -> Self {
        Self {
            config: ProviderConfig {
                base_url: Some(base_url.parse().expect("valid URL")),
                ..ProviderConfig::default()
            },
        }
    }

    /// Authenticate with an `x-api-key` header
    pub fn with_api_key(mut self, key: &str) -> Self {
        let auth = self.config.auth.get_or_insert_with(AuthConfig::default);
        auth.header_name = Some("x-api-key".to_owned());
        auth.header_value = Some(SecretString::from(key));
        self
    }

    /// Authenticate with a query parameter
    pub fn with_query_key(mut self, name: &str, key: &str) -> Self {
        let auth = self.config.auth.get_or_insert_with(AuthConfig::default);
        auth.param_name = Some(name.to_owned());
        auth.param_value = Some(SecretString::from(key));
        self
    }

    /// Override the default `anthropic-version`
    pub fn with_api_version(mut self, version: &str) -> Self {
        version.clone_into(&mut self.config.api_version);
        self
    }

    /// Set the request timeout as a duration string
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.timeout = Some(timeout.to_owned());
        self
    }

    pub fn build(self) -> ProviderConfig {
        self.config
    }
}
