//! Vault API client implementation.
//!
//! This module provides the main client for interacting with the vault.

mod builder;
mod config;
mod http;
mod query;
mod services;

pub use builder::VaultClientBuilder;
pub use config::VaultConfig;
pub use services::{CollectionsService, ObjectsService, SystemService, TokensService};

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::error::Result;

use self::http::HttpClient;

/// The main client for interacting with the vault.
///
/// Construction performs no I/O. The handle is cheap to clone and meant to be
/// reused for the lifetime of the process.
///
/// # Example
///
/// ```rust,no_run
/// use pvault_sdk::{Collection, Property, VaultClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), pvault_sdk::Error> {
///     let client = VaultClient::connect("http://localhost:8123", "pvaultauth")?;
///
///     let health = client.system().data_health().await?;
///     println!("Status: {}", health.status);
///
///     let customers = Collection::persons("customers")
///         .with_property(Property::new("email", "EMAIL"));
///     client.collections().add(&customers).await?;
///
///     for collection in client.collections().list().await? {
///         println!("Collection: {}", collection.name);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct VaultClient {
    http: Arc<HttpClient>,
    config: Arc<VaultConfig>,
}

impl VaultClient {
    /// Creates a new client builder.
    #[must_use]
    pub fn builder() -> VaultClientBuilder {
        VaultClientBuilder::new()
    }

    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: VaultConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config: Arc::new(config),
        })
    }

    /// Creates a client for `base_address` authenticated with a bearer token.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the address does not
    /// parse, [`Error::Configuration`](crate::Error::Configuration) if it is
    /// not HTTP or HTTPS.
    pub fn connect(base_address: &str, bearer_token: impl Into<String>) -> Result<Self> {
        Self::new(VaultConfig::new(base_address).with_bearer_token(bearer_token))
    }

    /// Creates a client with the specified base URL and authentication.
    ///
    /// # Errors
    ///
    /// Same as [`VaultClient::connect`].
    pub fn with_auth(base_url: &str, auth: impl Into<AuthProvider>) -> Result<Self> {
        Self::new(VaultConfig::new(base_url).with_auth(auth.into()))
    }

    /// Creates a client from `PVAULT_ADDRESS` and `PVAULT_TOKEN`.
    ///
    /// # Errors
    ///
    /// Same as [`VaultClient::connect`].
    pub fn from_env() -> Result<Self> {
        Self::new(VaultConfig::from_env())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ========================================================================
    // Service accessors
    // ========================================================================

    /// Returns the health check service.
    #[must_use]
    pub fn system(&self) -> SystemService {
        SystemService::new(Arc::clone(&self.http))
    }

    /// Returns the collections service.
    #[must_use]
    pub fn collections(&self) -> CollectionsService {
        CollectionsService::new(Arc::clone(&self.http))
    }

    /// Returns the objects service for a collection.
    #[must_use]
    pub fn objects(&self, collection: impl Into<String>) -> ObjectsService {
        ObjectsService::new(
            Arc::clone(&self.http),
            collection.into(),
            self.config.reason.clone(),
        )
    }

    /// Returns the tokens service for a collection.
    #[must_use]
    pub fn tokens(&self, collection: impl Into<String>) -> TokensService {
        TokensService::new(
            Arc::clone(&self.http),
            collection.into(),
            self.config.reason.clone(),
        )
    }
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_connect_creates_client() {
        let client = VaultClient::connect("http://localhost:8123", "pvaultauth")
            .expect("Failed to build client");
        assert_eq!(client.base_url(), "http://localhost:8123");
        assert_eq!(client.objects("customers").collection(), "customers");
    }

    #[test]
    fn test_connect_rejects_invalid_address() {
        assert!(matches!(
            VaultClient::connect("::not-a-url::", "pvaultauth"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            VaultClient::connect("ftp://localhost:8123", "pvaultauth"),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_client_debug_hides_token() {
        let client = VaultClient::connect("http://localhost:8123", "pvaultauth")
            .expect("Failed to build client");

        let debug = format!("{client:?}");
        assert!(debug.contains("localhost:8123"));
        assert!(!debug.contains("pvaultauth"));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VaultClient>();
    }
}
