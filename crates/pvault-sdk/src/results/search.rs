//! Token search index.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::models::TokenMetadata;

/// Token metadata indexed by token id and by object id.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    metadata: Vec<TokenMetadata>,
    token_to_objects: BTreeMap<String, Vec<Uuid>>,
    object_to_tokens: BTreeMap<Uuid, Vec<String>>,
}

impl SearchResult {
    /// Indexes a search response.
    #[must_use]
    pub fn new(metadata: Vec<TokenMetadata>) -> Self {
        let mut token_to_objects = BTreeMap::new();
        let mut object_to_tokens: BTreeMap<Uuid, Vec<String>> = BTreeMap::new();

        for datum in &metadata {
            let object_ids = datum.object_ids();
            for object_id in &object_ids {
                object_to_tokens
                    .entry(*object_id)
                    .or_default()
                    .push(datum.token_id.clone());
            }
            token_to_objects.insert(datum.token_id.clone(), object_ids);
        }

        Self {
            metadata,
            token_to_objects,
            object_to_tokens,
        }
    }

    /// The objects a token refers to.
    #[must_use]
    pub fn object_ids(&self, token_id: &str) -> Option<&[Uuid]> {
        self.token_to_objects.get(token_id).map(Vec::as_slice)
    }

    /// The first token found for an object.
    #[must_use]
    pub fn token_id(&self, object_id: &Uuid) -> Option<&str> {
        self.token_ids_of(object_id).first().map(String::as_str)
    }

    /// Every token found for an object, in response order.
    #[must_use]
    pub fn token_ids_of(&self, object_id: &Uuid) -> &[String] {
        self.object_to_tokens
            .get(object_id)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Distinct token ids, sorted.
    #[must_use]
    pub fn token_ids(&self) -> Vec<&str> {
        self.token_to_objects.keys().map(String::as_str).collect()
    }

    /// Metadata of a token.
    #[must_use]
    pub fn metadata(&self, token_id: &str) -> Option<&TokenMetadata> {
        self.metadata.iter().find(|m| m.token_id == token_id)
    }

    /// Number of tokens found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Returns true if no token matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

impl From<Vec<TokenMetadata>> for SearchResult {
    fn from(metadata: Vec<TokenMetadata>) -> Self {
        Self::new(metadata)
    }
}
