//! Credential injection into outgoing requests

use http::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tessera_config::AuthConfig;
use url::Url;

use crate::error::DriverError;

/// Adds the configured credential header and/or query parameter
#[derive(Debug, Clone, Default)]
pub struct AuthInjector {
    header: Option<(HeaderName, HeaderValue)>,
    param: Option<(String, SecretString)>,
}

impl AuthInjector {
    /// Build from auth configuration; `None` injects nothing
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Configuration` if the header name or value is
    /// not valid HTTP.
    pub fn from_config(config: Option<&AuthConfig>) -> Result<Self, DriverError> {
        let Some(config) = config else {
            return Ok(Self::default());
        };

        let header = match (&config.header_name, &config.header_value) {
            (Some(name), Some(value)) => {
                let name = HeaderName::try_from(name.as_str())
                    .map_err(|e| DriverError::Configuration(format!("invalid auth header name '{name}': {e}")))?;
                let mut value = HeaderValue::try_from(value.expose_secret())
                    .map_err(|e| DriverError::Configuration(format!("invalid value for auth header '{name}': {e}")))?;
                value.set_sensitive(true);
                Some((name, value))
            }
            _ => None,
        };

        let param = match (&config.param_name, &config.param_value) {
            (Some(name), Some(value)) => Some((name.clone(), value.clone())),
            _ => None,
        };

        Ok(Self { header, param })
    }

    /// Whether any credential will be injected
    pub const fn is_configured(&self) -> bool {
        self.header.is_some() || self.param.is_some()
    }

    /// Add credentials to the outgoing headers and URL
    pub fn apply(&self, headers: &mut HeaderMap, url: &mut Url) {
        if let Some((name, value)) = &self.header {
            headers.insert(name.clone(), value.clone());
        }

        if let Some((name, value)) = &self.param {
            url.query_pairs_mut().append_pair(name, value.expose_secret());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://api.anthropic.com/v1/messages").unwrap()
    }

    #[test]
    fn no_config_injects_nothing() {
        let injector = AuthInjector::from_config(None).unwrap();
        let mut headers = HeaderMap::new();
        let mut url = url();

        injector.apply(&mut headers, &mut url);

        assert!(!injector.is_configured());
        assert!(headers.is_empty());
        assert_eq!(url.query(), None);
    }

    #[test]
    fn header_credential_is_sensitive() {
        let config = AuthConfig {
            header_name: Some("x-api-key".to_owned()),
            header_value: Some(SecretString::from("sk-ant-123")),
            ..AuthConfig::default()
        };
        let injector = AuthInjector::from_config(Some(&config)).unwrap();
        let mut headers = HeaderMap::new();

        injector.apply(&mut headers, &mut url());

        let value = headers.get("x-api-key").unwrap();
        assert_eq!(value, "sk-ant-123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn query_credential_appended() {
        let config = AuthConfig {
            param_name: Some("key".to_owned()),
            param_value: Some(SecretString::from("abc def")),
            ..AuthConfig::default()
        };
        let injector = AuthInjector::from_config(Some(&config)).unwrap();
        let mut url = url();

        injector.apply(&mut HeaderMap::new(), &mut url);

        assert_eq!(url.query(), Some("key=abc+def"));
    }

    #[test]
    fn invalid_header_name_rejected() {
        let config = AuthConfig {
            header_name: Some("bad header".to_owned()),
            header_value: Some(SecretString::from("v")),
            ..AuthConfig::default()
        };

        let err = AuthInjector::from_config(Some(&config)).unwrap_err();
        assert!(matches!(err, DriverError::Configuration(_)));
    }
}
