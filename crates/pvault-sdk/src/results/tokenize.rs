//! Pairing of tokenized objects with their tokens.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::TokenValue;

/// Tokens returned by a tokenize call, paired with the objects requested.
///
/// Built on the vault's guarantee that tokens come back in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizeResult {
    object_ids: Vec<Uuid>,
    token_values: Vec<TokenValue>,
    object_to_token: BTreeMap<Uuid, String>,
    token_to_objects: BTreeMap<String, Vec<Uuid>>,
}

impl TokenizeResult {
    /// Pairs `object_ids[i]` with `token_values[i]`.
    ///
    /// # Errors
    ///
    /// [`Error::ResponseMismatch`] if the two lists differ in length.
    pub fn new(object_ids: Vec<Uuid>, token_values: Vec<TokenValue>) -> Result<Self> {
        if object_ids.len() != token_values.len() {
            return Err(Error::ResponseMismatch {
                expected: object_ids.len(),
                actual: token_values.len(),
            });
        }

        let mut object_to_token = BTreeMap::new();
        let mut token_to_objects: BTreeMap<String, Vec<Uuid>> = BTreeMap::new();

        for (object_id, token) in object_ids.iter().zip(&token_values) {
            object_to_token.insert(*object_id, token.token_id.clone());
            token_to_objects
                .entry(token.token_id.clone())
                .or_default()
                .push(*object_id);
        }

        Ok(Self {
            object_ids,
            token_values,
            object_to_token,
            token_to_objects,
        })
    }

    /// Token values in request order.
    #[must_use]
    pub fn token_values(&self) -> &[TokenValue] {
        &self.token_values
    }

    /// Object ids in request order.
    #[must_use]
    pub fn object_ids(&self) -> &[Uuid] {
        &self.object_ids
    }

    /// Distinct token ids, sorted.
    #[must_use]
    pub fn token_ids(&self) -> Vec<&str> {
        self.token_to_objects.keys().map(String::as_str).collect()
    }

    /// The token issued for an object.
    #[must_use]
    pub fn token_id(&self, object_id: &Uuid) -> Option<&str> {
        self.object_to_token.get(object_id).map(String::as_str)
    }

    /// The objects sharing a token.
    ///
    /// Deterministic tokens over equal values map to several objects.
    #[must_use]
    pub fn object_ids_of(&self, token_id: &str) -> Option<&[Uuid]> {
        self.token_to_objects.get(token_id).map(Vec::as_slice)
    }

    /// (object id, token id) pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = (Uuid, &str)> + '_ {
        self.object_ids
            .iter()
            .zip(&self.token_values)
            .map(|(id, token)| (*id, token.token_id.as_str()))
    }

    /// Number of tokenized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.token_values.len()
    }

    /// Returns true if nothing was tokenized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token_values.is_empty()
    }
}
