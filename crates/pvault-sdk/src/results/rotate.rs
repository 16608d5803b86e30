//! Rotation mapping.

use crate::error::{Error, Result};
use crate::models::{RotatedTokens, TokenValue};

use super::TokenizeResult;

/// Old-to-new token ids returned by a rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotateResult {
    rotated: RotatedTokens,
}

impl RotateResult {
    /// Wraps the rotation response.
    #[must_use]
    pub fn new(rotated: RotatedTokens) -> Self {
        Self { rotated }
    }

    /// The id that replaced `old_token_id`.
    #[must_use]
    pub fn new_token_id(&self, old_token_id: &str) -> Option<&str> {
        self.rotated.get(old_token_id).map(String::as_str)
    }

    /// Rotated-away ids, sorted.
    #[must_use]
    pub fn old_token_ids(&self) -> Vec<&str> {
        self.rotated.keys().map(String::as_str).collect()
    }

    /// Replacement ids, ordered by their old id.
    #[must_use]
    pub fn new_token_ids(&self) -> Vec<&str> {
        self.rotated.values().map(String::as_str).collect()
    }

    /// Rewrites a tokenize result with the rotated ids.
    ///
    /// Each object keeps its position; only its token id changes.
    ///
    /// # Errors
    ///
    /// [`Error::MissingToken`] if a token of `tokenized` was not rotated.
    pub fn rotate(&self, tokenized: &TokenizeResult) -> Result<TokenizeResult> {
        let token_values = tokenized
            .pairs()
            .map(|(_, old)| {
                self.new_token_id(old)
                    .map(TokenValue::new)
                    .ok_or_else(|| Error::MissingToken {
                        token_id: old.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        TokenizeResult::new(tokenized.object_ids().to_vec(), token_values)
    }

    /// Number of rotated tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rotated.len()
    }

    /// Returns true if nothing was rotated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotated.is_empty()
    }
}

impl From<RotatedTokens> for RotateResult {
    fn from(rotated: RotatedTokens) -> Self {
        Self::new(rotated)
    }
}
