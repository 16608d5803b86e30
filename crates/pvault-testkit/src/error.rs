//! Error responses of the fake vault.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Result type of store operations and handlers.
pub type VaultResult<T> = Result<T, VaultError>;

/// Error returned by the fake vault.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Bad request (400).
    #[error("{message}")]
    BadRequest {
        /// Message.
        message: String,
        /// Offending parameters.
        context: HashMap<String, Value>,
    },

    /// Missing or wrong bearer token (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found (404).
    #[error("{message}")]
    NotFound {
        /// Message.
        message: String,
        /// Missing resource.
        context: HashMap<String, Value>,
    },

    /// Conflict (409).
    #[error("{message}")]
    Conflict {
        /// Message.
        message: String,
        /// Conflicting resource.
        context: HashMap<String, Value>,
    },
}

/// Body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error_code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    context: HashMap<String, Value>,
}

impl VaultError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            context: HashMap::new(),
        }
    }

    /// Creates a not found error naming the missing resource.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::NotFound {
            message: format!("{kind} '{id}' not found"),
            context: HashMap::from([(kind.to_lowercase(), Value::String(id))]),
        }
    }

    /// Creates a conflict error naming the conflicting resource.
    pub fn conflict(kind: &str, id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::Conflict {
            message: format!("{kind} '{id}' already exists"),
            context: HashMap::from([(kind.to_lowercase(), Value::String(id))]),
        }
    }

    /// Adds a context entry.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Self::BadRequest { context, .. }
        | Self::NotFound { context, .. }
        | Self::Conflict { context, .. } = &mut self
        {
            context.insert(key.to_string(), value.into());
        }
        self
    }

    /// Returns the HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    /// Returns the vault error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "PV1000",
            Self::Unauthorized(_) => "PV1001",
            Self::Conflict { .. } => "PV1004",
            Self::NotFound { .. } => "PV1005",
        }
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let context = match self {
            Self::BadRequest { context, .. }
            | Self::NotFound { context, .. }
            | Self::Conflict { context, .. } => context,
            Self::Unauthorized(_) => HashMap::new(),
        };

        let body = ErrorBody {
            error_code,
            message,
            context,
        };

        (status, Json(body)).into_response()
    }
}
