//! Detokenized values by token id.

use std::collections::BTreeSet;

use crate::models::{DetokenizedToken, ObjectFields, TokenMetadata};

/// Detokenize response indexed by token id.
#[derive(Debug, Clone, Default)]
pub struct DetokenizeResult {
    tokens: Vec<DetokenizedToken>,
}

impl DetokenizeResult {
    /// Wraps a detokenize response.
    #[must_use]
    pub fn new(tokens: Vec<DetokenizedToken>) -> Self {
        Self { tokens }
    }

    /// The values a token resolved to.
    #[must_use]
    pub fn fields(&self, token_id: &str) -> Option<&ObjectFields> {
        self.get(token_id).map(|t| &t.fields)
    }

    /// Token metadata, if it was requested.
    #[must_use]
    pub fn metadata(&self, token_id: &str) -> Option<&TokenMetadata> {
        self.get(token_id).and_then(|t| t.metadata.as_ref())
    }

    /// The entry for a token id.
    #[must_use]
    pub fn get(&self, token_id: &str) -> Option<&DetokenizedToken> {
        self.tokens.iter().find(|t| t.token_id == token_id)
    }

    /// Distinct token ids in the response.
    #[must_use]
    pub fn token_ids(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(|t| t.token_id.as_str()).collect()
    }

    /// Entries in response order.
    #[must_use]
    pub fn tokens(&self) -> &[DetokenizedToken] {
        &self.tokens
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<DetokenizedToken>> for DetokenizeResult {
    fn from(tokens: Vec<DetokenizedToken>) -> Self {
        Self::new(tokens)
    }
}
