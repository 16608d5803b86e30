//! Common types used across the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field values of an object, keyed by property name.
///
/// Projections with a transformation suffix come back under the suffixed
/// key, e.g. `"email.mask"`.
pub type ObjectFields = serde_json::Map<String, Value>;

/// Access justification sent with every data-plane call.
///
/// The vault records it in its audit log; the client never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(String);

impl Reason {
    /// The reason used by application code paths.
    pub const APP_FUNCTIONALITY: &'static str = "AppFunctionality";

    /// Creates a reason from free text.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Returns the `AppFunctionality` reason.
    #[must_use]
    pub fn app_functionality() -> Self {
        Self::new(Self::APP_FUNCTIONALITY)
    }

    /// Returns the reason as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Reason {
    fn default() -> Self {
        Self::app_functionality()
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reason {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

impl From<String> for Reason {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

/// Health of a vault service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"pass"` when the service is healthy.
    pub status: String,
}

impl HealthStatus {
    /// Status string reported by a healthy service.
    pub const PASS: &'static str = "pass";

    /// Returns true if the service reported `"pass"`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == Self::PASS
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.status)
    }
}

/// Cursor pagination information attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Cursor to pass to fetch the next page. Empty on the last page.
    #[serde(default)]
    pub cursor: String,

    /// Number of items in this page.
    #[serde(default)]
    pub size: u64,

    /// Number of items after this page.
    #[serde(default)]
    pub remaining_count: u64,
}

impl Paging {
    /// Returns true if more items follow this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.remaining_count > 0 && !self.cursor.is_empty()
    }

    /// Total number of items across this page and the remaining ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.size + self.remaining_count
    }
}

/// Time-to-live of a token, in seconds, as understood by the vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ttl(String);

impl Ttl {
    /// Expires immediately. Updating a token with this TTL archives it.
    #[must_use]
    pub fn expired() -> Self {
        Self("0".to_string())
    }

    /// Expires after the given number of seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self(secs.to_string())
    }

    /// Returns the TTL as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
