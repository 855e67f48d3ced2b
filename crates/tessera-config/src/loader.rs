use std::path::Path;

use secrecy::ExposeSecret;

use crate::{AuthConfig, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion fails,
    /// TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(models = config.models.len(), "configuration loaded");

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_models()?;
        self.validate_provider()?;
        Ok(())
    }

    fn validate_models(&self) -> anyhow::Result<()> {
        for (alias, model) in &self.models {
            if model.name.trim().is_empty() {
                anyhow::bail!("model '{alias}' must have a non-empty name");
            }

            if let Some(temperature) = model.temperature()
                && (!temperature.is_finite() || temperature < 0.0)
            {
                anyhow::bail!("model '{alias}' temperature must be a non-negative number");
            }

            if model.max_tokens() == Some(0) {
                anyhow::bail!("model '{alias}' max_tokens must be greater than 0");
            }
        }

        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        if self.provider.api_version.trim().is_empty() {
            anyhow::bail!("provider.api_version must not be empty");
        }

        self.provider.timeout_duration()?;

        if let Some(ref auth) = self.provider.auth {
            validate_auth(auth)?;
        }

        Ok(())
    }
}

fn validate_auth(auth: &AuthConfig) -> anyhow::Result<()> {
    if auth.header_name.is_some() != auth.header_value.is_some() {
        anyhow::bail!("provider.auth.header_name and header_value must be set together");
    }

    if auth.param_name.is_some() != auth.param_value.is_some() {
        anyhow::bail!("provider.auth.param_name and param_value must be set together");
    }

    if auth
        .header_value
        .as_ref()
        .is_some_and(|value| value.expose_secret().is_empty())
    {
        anyhow::bail!("provider.auth.header_value must not be empty");
    }

    Ok(())
}
