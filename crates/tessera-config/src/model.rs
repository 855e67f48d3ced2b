use serde::Deserialize;
use url::Url;

/// Upstream model identity and generation options
///
/// Passed alongside every transform call. Nothing in the transform
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Model name sent upstream (e.g. `claude-2.1`)
    pub name: String,
    /// Generation and routing options
    #[serde(default)]
    pub options: Option<ModelOptions>,
}

/// Optional per-model settings
///
/// Unset fields are omitted from outgoing requests rather than defaulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelOptions {
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Full upstream URL, overriding the provider base URL and route path
    #[serde(default)]
    pub upstream_url: Option<Url>,
    /// Provider API version (sent as `anthropic-version`)
    #[serde(default)]
    pub provider_version: Option<String>,
}

impl ModelConfig {
    /// Model with the given name and no options
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    /// Attach options
    #[must_use]
    pub fn with_options(mut self, options: ModelOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Configured temperature, if any
    pub fn temperature(&self) -> Option<f64> {
        self.options.as_ref().and_then(|o| o.temperature)
    }

    /// Configured token limit, if any
    pub fn max_tokens(&self) -> Option<u32> {
        self.options.as_ref().and_then(|o| o.max_tokens)
    }

    /// Configured upstream URL override, if any
    pub fn upstream_url(&self) -> Option<&Url> {
        self.options.as_ref().and_then(|o| o.upstream_url.as_ref())
    }

    /// Configured provider API version, if any
    pub fn provider_version(&self) -> Option<&str> {
        self.options.as_ref().and_then(|o| o.provider_version.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_optional() {
        let model: ModelConfig = toml::from_str(r#"name = "claude-2.1""#).unwrap();
        assert_eq!(model.name, "claude-2.1");
        assert!(model.options.is_none());
        assert_eq!(model.temperature(), None);
        assert_eq!(model.max_tokens(), None);
    }

    #[test]
    fn deserialize_full_options() {
        let toml = r#"
            name = "claude-3-haiku-20240307"

            [options]
            temperature = 0.5
            max_tokens = 256
            upstream_url = "http://localhost:9000/v1/messages"
            provider_version = "2023-06-01"
        "#;

        let model: ModelConfig = toml::from_str(toml).unwrap();
        assert_eq!(model.temperature(), Some(0.5));
        assert_eq!(model.max_tokens(), Some(256));
        assert_eq!(
            model.upstream_url().map(Url::as_str),
            Some("http://localhost:9000/v1/messages")
        );
        assert_eq!(model.provider_version(), Some("2023-06-01"));
    }

    #[test]
    fn unknown_option_rejected() {
        let toml = r#"
            name = "claude"

            [options]
            top_k = 3
        "#;

        assert!(toml::from_str::<ModelConfig>(toml).is_err());
    }
}
