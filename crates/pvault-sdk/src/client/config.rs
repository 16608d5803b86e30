//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::auth::AuthProvider;
use crate::error::{Error, Result};
use crate::models::Reason;

/// Configuration for the vault client.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Base address of the vault, without the API prefix.
    pub base_url: String,

    /// Authentication provider.
    pub auth: AuthProvider,

    /// Access reason sent with data-plane calls.
    pub reason: Reason,

    /// Request timeout.
    pub timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl VaultConfig {
    /// Address used when none is configured.
    pub const DEFAULT_ADDRESS: &'static str = "http://localhost:8123";

    /// Bearer token of a development vault.
    pub const DEFAULT_BEARER_TOKEN: &'static str = "pvaultauth";

    /// Environment variable holding the vault address.
    pub const ADDRESS_ENV: &'static str = "PVAULT_ADDRESS";

    /// Environment variable holding the bearer token.
    pub const TOKEN_ENV: &'static str = "PVAULT_TOKEN";

    /// Creates a new configuration with the specified base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: AuthProvider::default(),
            reason: Reason::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: crate::USER_AGENT.to_string(),
        }
    }

    /// Reads `PVAULT_ADDRESS` and `PVAULT_TOKEN`, falling back to the
    /// development defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self::new(read(Self::ADDRESS_ENV, Self::DEFAULT_ADDRESS))
            .with_bearer_token(read(Self::TOKEN_ENV, Self::DEFAULT_BEARER_TOKEN))
    }

    /// Sets the authentication provider.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Authenticates with a bearer token.
    #[must_use]
    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        self.with_auth(AuthProvider::bearer(token))
    }

    /// Sets the access reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Reason>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks that the base URL parses and uses HTTP or HTTPS.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] if the address does not parse,
    /// [`Error::Configuration`] for any other scheme.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::config(format!(
                "unsupported URL scheme '{other}' in {}; only http:// and https:// are allowed",
                self.base_url
            ))),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADDRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = VaultConfig::new("http://localhost:8123/");
        assert_eq!(config.url("/api/pvlt/1.0/ctl/info/health"), "http://localhost:8123/api/pvlt/1.0/ctl/info/health");
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = VaultConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:8123");
        assert!(matches!(config.auth, AuthProvider::Bearer(_)));
        assert_eq!(config.reason.as_str(), "AppFunctionality");
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PVAULT_ADDRESS", "https://vault.internal:9443"),
            ("PVAULT_TOKEN", "secret"),
        ]
        .into_iter()
        .collect();

        let config = VaultConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://vault.internal:9443");
    }

    #[test]
    fn test_blank_variable_falls_back_to_default() {
        let config = VaultConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.base_url, VaultConfig::DEFAULT_ADDRESS);
    }

    #[test]
    fn test_validate_scheme() {
        assert!(VaultConfig::new("https://vault.example.com").validate().is_ok());
        assert!(VaultConfig::new("http://127.0.0.1:8123").validate().is_ok());
        assert!(matches!(
            VaultConfig::new("ftp://vault.example.com").validate(),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            VaultConfig::new("not a url").validate(),
            Err(Error::InvalidUrl(_))
        ));
    }
}
