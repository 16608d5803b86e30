//! HTTP client wrapper with authentication and error decoding.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::auth::Authenticator;
use crate::error::{ApiError, Error, Result};

use super::config::VaultConfig;

/// Internal HTTP client. Every call is a single request, never retried.
pub struct HttpClient {
    client: Client,
    config: VaultConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(config: &VaultConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Makes a GET request.
    #[instrument(skip(self), fields(url = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Makes a POST request.
    #[instrument(skip(self, body), fields(url = %path))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Makes a POST request without a body.
    #[instrument(skip(self), fields(url = %path))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, Option::<&()>::None).await
    }

    /// Makes a PATCH request that expects no content.
    #[instrument(skip(self, body), fields(url = %path))]
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    /// Makes a DELETE request.
    #[instrument(skip(self), fields(url = %path))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, Option::<&()>::None).await?;
        Ok(())
    }

    /// Makes a request with an optional JSON body and decodes a JSON response.
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.execute(method, path, body).await?;
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            debug!("Failed to parse response: {}", String::from_utf8_lossy(&bytes));
            Error::Serialization(e)
        })
    }

    /// Sends a request and converts non-success statuses into errors.
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let mut request = self.client.request(method, self.config.url(path));
        request = self.config.auth.authenticate(request).await?;

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::response_to_error(response).await)
        }
    }

    /// Classifies a transport failure.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_connect() {
            Error::Connection {
                base_url: self.config.base_url.clone(),
                source: err,
            }
        } else if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            Error::Network(err)
        }
    }

    /// Converts an error response to an Error.
    async fn response_to_error(response: Response) -> Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        let mut api_error = serde_json::from_slice::<ApiError>(&bytes).unwrap_or_else(|_| {
            // Not a vault error body; keep whatever the server sent
            ApiError::new(status.as_u16(), String::from_utf8_lossy(&bytes).trim())
        });
        api_error.status = status.as_u16();
        if api_error.message.is_empty() {
            api_error.message = status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string();
        }

        warn!(
            status = status.as_u16(),
            error_code = api_error.error_code.as_deref().unwrap_or("-"),
            message = %api_error.message,
            "Vault returned an error"
        );

        api_error.into_error()
    }
}

impl Clone for HttpClient {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
