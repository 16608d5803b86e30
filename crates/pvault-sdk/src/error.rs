//! Error types for the vault client.
//!
//! Every failure is surfaced as a typed [`Error`]. When the vault answers with
//! an error status, its JSON body is decoded into an [`ApiError`] and carried
//! by the variant that matches the HTTP status.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The main error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request was rejected as malformed (HTTP 400).
    #[error("Bad request: {error}")]
    BadRequest {
        /// Decoded error body.
        error: ApiError,
    },

    /// A submitted schema or object did not validate.
    #[error("Validation failed: {error}")]
    Validation {
        /// Decoded error body.
        error: ApiError,
    },

    /// Missing or invalid bearer token (HTTP 401).
    #[error("Unauthorized: {error}")]
    Unauthorized {
        /// Decoded error body.
        error: ApiError,
    },

    /// The caller may not perform this operation (HTTP 403).
    #[error("Forbidden: {error}")]
    Forbidden {
        /// Decoded error body.
        error: ApiError,
    },

    /// Collection, object or token does not exist (HTTP 404).
    #[error("Not found: {error}")]
    NotFound {
        /// Decoded error body.
        error: ApiError,
    },

    /// The request conflicts with existing state, e.g. a duplicate collection (HTTP 409).
    #[error("Conflict: {error}")]
    Conflict {
        /// Decoded error body.
        error: ApiError,
    },

    /// Any other error status returned by the vault.
    #[error("Server error: {error}")]
    ServerError {
        /// Decoded error body.
        error: ApiError,
    },

    /// The vault could not be reached at all.
    #[error("Unable to connect to the vault at {base_url}. Is it up?")]
    Connection {
        /// Address the client was configured with.
        base_url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// Any other transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// Error serializing a request or deserializing a response.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid base address.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A response list did not line up with the request list it answers.
    #[error("Response mismatch: expected {expected} items, got {actual}")]
    ResponseMismatch {
        /// Number of items sent.
        expected: usize,
        /// Number of items received.
        actual: usize,
    },

    /// A token id expected in a response was missing from it.
    #[error("Token '{token_id}' is missing from the response")]
    MissingToken {
        /// The token id that could not be found.
        token_id: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the decoded vault error body, if the vault answered at all.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::BadRequest { error }
            | Self::Validation { error }
            | Self::Unauthorized { error }
            | Self::Forbidden { error }
            | Self::NotFound { error }
            | Self::Conflict { error }
            | Self::ServerError { error } => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status code if the error came from a vault response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    /// Returns the vault error code (e.g. `PV1005`), if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.api_error().and_then(|e| e.error_code.as_deref())
    }

    /// True for [`Error::NotFound`].
    ///
    /// Cleanup paths use this to treat a missing resource as benign.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for [`Error::Conflict`].
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// True for [`Error::BadRequest`].
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }

    /// True when the vault could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Reclassifies a `BadRequest` as a `Validation` error.
    ///
    /// The vault answers 400 for malformed schemas; callers submitting a
    /// schema use this so they can tell the two apart.
    #[must_use]
    pub(crate) fn into_validation(self) -> Self {
        match self {
            Self::BadRequest { error } => Self::Validation { error },
            other => other,
        }
    }
}

/// Error body returned by the vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status of the response. Not part of the body.
    #[serde(skip)]
    pub status: u16,

    /// Vault error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Link to the vault's documentation for this error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_url: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,

    /// Structured details, keyed by parameter name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl ApiError {
    /// Creates an error body with a status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sets the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Adds a context entry.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts this body to the [`Error`] variant matching its status.
    #[must_use]
    pub fn into_error(self) -> Error {
        match self.status {
            400 => Error::BadRequest { error: self },
            401 => Error::Unauthorized { error: self },
            403 => Error::Forbidden { error: self },
            404 => Error::NotFound { error: self },
            409 => Error::Conflict { error: self },
            422 => Error::Validation { error: self },
            _ => Error::ServerError { error: self },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.error_code {
            write!(f, " ({code})")?;
        }
        Ok(())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
