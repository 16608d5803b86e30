//! Client builder for fluent configuration.

use std::time::Duration;

use crate::auth::AuthProvider;
use crate::error::{Error, Result};
use crate::models::Reason;

use super::config::VaultConfig;
use super::VaultClient;

/// Builder for creating a [`VaultClient`].
///
/// # Example
///
/// ```rust,no_run
/// use pvault_sdk::VaultClient;
/// use std::time::Duration;
///
/// let client = VaultClient::builder()
///     .base_url("http://localhost:8123")
///     .bearer_token("pvaultauth")
///     .reason("Support")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok::<(), pvault_sdk::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct VaultClientBuilder {
    base_url: Option<String>,
    auth: Option<AuthProvider>,
    reason: Option<Reason>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VaultClientBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base address of the vault.
    ///
    /// This is required and must be called before [`build()`](Self::build).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer token for authentication.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthProvider::bearer(token));
        self
    }

    /// Sets a custom authentication provider.
    #[must_use]
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the access reason sent with data-plane calls.
    ///
    /// Default: `AppFunctionality`.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<Reason>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Default: 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Default: 10 seconds.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or invalid.
    pub fn build(self) -> Result<VaultClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::config("base_url is required"))?;

        let mut config = VaultConfig::new(base_url);

        if let Some(auth) = self.auth {
            config = config.with_auth(auth);
        }

        if let Some(reason) = self.reason {
            config = config.with_reason(reason);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            config = config.with_connect_timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }

        VaultClient::new(config)
    }
}
