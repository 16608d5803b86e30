//! Wire shapes accepted and produced by the fake vault.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field values keyed by property name.
pub type Fields = Map<String, Value>;

/// A collection schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub collection_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<DateTime<Utc>>,
}

impl CollectionDef {
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// One property of a collection schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(alias = "pii_type_name")]
    pub data_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub is_index: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Pointer,
    Randomized,
    Deterministic,
    Pci,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputObject {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub fields: Option<Fields>,
}

/// One entry of a tokenize body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizeEntry {
    pub object: InputObject,
    #[serde(default)]
    pub props: Vec<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reversible: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenValue {
    pub token_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryToken {
    #[serde(default)]
    pub token_ids: Vec<String>,
    #[serde(default)]
    pub object_ids: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateToken {
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectQuery {
    #[serde(rename = "match", default)]
    pub match_fields: Fields,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenRefOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
    pub props: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenMetadataOut {
    pub token_id: String,
    pub tokens: Vec<TokenRefOut>,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub creation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetokenizedOut {
    pub token_id: String,
    pub fields: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TokenMetadataOut>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paging {
    pub cursor: String,
    pub size: usize,
    pub remaining_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectsPage {
    pub results: Vec<Fields>,
    pub paging: Paging,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkItem {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub ok: bool,
    pub results: Vec<BulkItem>,
}

/// Old token id to new token id.
pub type Rotated = BTreeMap<String, String>;
