//! Shared state of the fake vault.

use parking_lot::RwLock;

use crate::store::VaultStore;

/// State shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Vault contents.
    pub store: RwLock<VaultStore>,
    /// Bearer token every non-health request must carry.
    pub token: String,
}

impl AppState {
    /// Creates an empty vault guarded by `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            store: RwLock::new(VaultStore::new()),
            token: token.into(),
        }
    }
}
