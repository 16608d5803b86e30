//! Token models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::ObjectFields;

/// How a token relates to the values it stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// References the object; detokenizes to its current values.
    Pointer,
    /// Random token embedding the values at tokenization time.
    Randomized,
    /// Same values always yield the same token.
    Deterministic,
    /// Format suitable for payment card data.
    Pci,
}

impl TokenType {
    /// Every token type.
    pub const ALL: [Self; 4] = [
        Self::Pointer,
        Self::Randomized,
        Self::Deterministic,
        Self::Pci,
    ];
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pointer => write!(f, "pointer"),
            Self::Randomized => write!(f, "randomized"),
            Self::Deterministic => write!(f, "deterministic"),
            Self::Pci => write!(f, "pci"),
        }
    }
}

impl std::str::FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pointer" => Ok(Self::Pointer),
            "randomized" => Ok(Self::Randomized),
            "deterministic" => Ok(Self::Deterministic),
            "pci" => Ok(Self::Pci),
            _ => Err(format!("Unknown token type: {s}")),
        }
    }
}

/// The object a tokenize request refers to.
///
/// Either a stored object by id, or inline values to embed in the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputObject {
    /// Id of a stored object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Inline values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ObjectFields>,
}

/// One entry of a tokenize call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizeRequest {
    /// Object whose values are tokenized.
    pub object: InputObject,

    /// Properties included in the token.
    pub props: Vec<String>,

    /// Token type.
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Free-text tags attached to the token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Whether the token can be detokenized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversible: Option<bool>,
}

impl TokenizeRequest {
    /// Tokenizes properties of a stored object.
    #[must_use]
    pub fn for_object(id: Uuid, token_type: TokenType) -> Self {
        Self {
            object: InputObject {
                id: Some(id),
                fields: None,
            },
            props: Vec::new(),
            token_type,
            tags: Vec::new(),
            reversible: None,
        }
    }

    /// Tokenizes inline values without storing them as an object.
    #[must_use]
    pub fn for_fields(fields: ObjectFields, token_type: TokenType) -> Self {
        Self {
            object: InputObject {
                id: None,
                fields: Some(fields),
            },
            props: Vec::new(),
            token_type,
            tags: Vec::new(),
            reversible: None,
        }
    }

    /// Sets the properties to include.
    #[must_use]
    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props = props.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the token can be detokenized.
    #[must_use]
    pub fn with_reversible(mut self, reversible: bool) -> Self {
        self.reversible = Some(reversible);
        self
    }
}

/// A token returned by tokenize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenValue {
    /// Opaque token id.
    pub token_id: String,
}

impl TokenValue {
    /// Wraps a token id.
    #[must_use]
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
        }
    }
}

/// A token resolved back to its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetokenizedToken {
    /// Token id that was resolved.
    pub token_id: String,

    /// Resolved values, keyed by property name.
    #[serde(default)]
    pub fields: ObjectFields,

    /// Token metadata, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TokenMetadata>,
}

/// Metadata of a token and the objects it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token id.
    pub token_id: String,

    /// One entry per object the token refers to.
    #[serde(default)]
    pub tokens: Vec<TokenRefMetadata>,

    /// Tags attached to the token.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Token type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,

    /// When the token was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
}

impl TokenMetadata {
    /// Returns the ids of the objects this token covers.
    #[must_use]
    pub fn object_ids(&self) -> Vec<Uuid> {
        self.tokens.iter().filter_map(|r| r.object_id).collect()
    }
}

/// Reference from a token to one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRefMetadata {
    /// Referenced object. Absent for tokens over inline values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,

    /// Properties of the object covered by the token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<String>,
}

/// Selects the tokens an operation applies to.
///
/// The vault treats the three modes as alternative filters, never
/// conjunctive ones, so a selector always carries exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenSelector {
    /// Explicit token ids.
    TokenIds(Vec<String>),
    /// Every token referring to one of these objects.
    ObjectIds(Vec<Uuid>),
    /// Every token carrying one of these tags.
    Tags(Vec<String>),
}

impl TokenSelector {
    /// Selects explicit token ids.
    #[must_use]
    pub fn token_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TokenIds(ids.into_iter().map(Into::into).collect())
    }

    /// Selects by referenced object.
    #[must_use]
    pub fn object_ids(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self::ObjectIds(ids.into_iter().collect())
    }

    /// Selects by tag.
    #[must_use]
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags(tags.into_iter().map(Into::into).collect())
    }

    /// Query parameter name of this selection mode.
    #[must_use]
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::TokenIds(_) => "token_ids",
            Self::ObjectIds(_) => "object_ids",
            Self::Tags(_) => "tags",
        }
    }

    /// Selected values, one string per value.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::TokenIds(ids) | Self::Tags(ids) => ids.clone(),
            Self::ObjectIds(ids) => ids.iter().map(Uuid::to_string).collect(),
        }
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::TokenIds(ids) | Self::Tags(ids) => ids.is_empty(),
            Self::ObjectIds(ids) => ids.is_empty(),
        }
    }
}

/// Body of a token search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryToken {
    /// Match these token ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<String>,

    /// Match tokens of these objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_ids: Vec<Uuid>,

    /// Match tokens with these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl From<TokenSelector> for QueryToken {
    fn from(selector: TokenSelector) -> Self {
        match selector {
            TokenSelector::TokenIds(token_ids) => Self {
                token_ids,
                ..Self::default()
            },
            TokenSelector::ObjectIds(object_ids) => Self {
                object_ids,
                ..Self::default()
            },
            TokenSelector::Tags(tags) => Self {
                tags,
                ..Self::default()
            },
        }
    }
}

/// Changes applied by a token update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTokenRequest {
    /// Replacement tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateTokenRequest {
    /// Creates an update that changes nothing in the body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Flags controlling detokenize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetokenizeOptions {
    /// Return token metadata alongside the values.
    pub include_metadata: bool,
    /// Include tokens whose object or whose token itself is archived.
    pub include_archived: bool,
}

impl DetokenizeOptions {
    /// Wire name of `include_metadata`.
    pub const INCLUDE_METADATA: &'static str = "include_metadata";
    /// Wire name of `include_archived`.
    pub const ARCHIVED: &'static str = "archived";

    /// Requests metadata.
    #[must_use]
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    /// Requests archived tokens as well.
    #[must_use]
    pub fn with_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Option names sent on the wire.
    #[must_use]
    pub fn options(&self) -> Vec<&'static str> {
        let mut options = Vec::new();
        if self.include_metadata {
            options.push(Self::INCLUDE_METADATA);
        }
        if self.include_archived {
            options.push(Self::ARCHIVED);
        }
        options
    }
}

/// Result of a rotation: old token id to new token id.
pub type RotatedTokens = BTreeMap<String, String>;
