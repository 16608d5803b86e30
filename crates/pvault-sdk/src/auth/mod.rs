//! Authentication for vault requests.
//!
//! The vault authenticates every call with a bearer token. [`AuthProvider`]
//! wraps the supported schemes and applies them to outgoing requests.

mod provider;

pub use provider::{AuthProvider, BearerAuth, NoAuth};

use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::error::Result;

/// Trait for authentication providers.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Apply authentication to a request.
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder>;
}
