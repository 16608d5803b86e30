//! Authentication providers.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

use super::Authenticator;
use crate::error::Result;

/// Bearer token authentication.
#[derive(Clone)]
pub struct BearerAuth {
    token: SecretString,
}

impl BearerAuth {
    /// Creates a new bearer token authenticator.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BearerAuth {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request.bearer_auth(self.token.expose_secret()))
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// No authentication.
#[derive(Debug, Clone, Default)]
pub struct NoAuth;

impl NoAuth {
    /// Creates a new no-auth provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoAuth {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request)
    }
}

/// Enum wrapper for the supported auth providers.
#[derive(Clone)]
pub enum AuthProvider {
    /// Bearer token authentication.
    Bearer(BearerAuth),
    /// No authentication.
    None(NoAuth),
}

impl AuthProvider {
    /// Creates bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(BearerAuth::new(token))
    }

    /// Creates no authentication.
    #[must_use]
    pub fn none() -> Self {
        Self::None(NoAuth::new())
    }
}

impl Default for AuthProvider {
    fn default() -> Self {
        Self::None(NoAuth::new())
    }
}

impl From<BearerAuth> for AuthProvider {
    fn from(auth: BearerAuth) -> Self {
        Self::Bearer(auth)
    }
}

#[async_trait]
impl Authenticator for AuthProvider {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self {
            Self::Bearer(auth) => auth.authenticate(request).await,
            Self::None(auth) => auth.authenticate(request).await,
        }
    }
}

impl std::fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(auth) => write!(f, "AuthProvider::Bearer({auth:?})"),
            Self::None(auth) => write!(f, "AuthProvider::None({auth:?})"),
        }
    }
}
