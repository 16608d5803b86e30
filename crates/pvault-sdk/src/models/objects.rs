//! Object models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::common::{ObjectFields, Paging};
use crate::error::ApiError;

/// Transformation that masks all but the identifying part of a value.
pub const MASK: &str = "mask";

/// Builds a transformed projection such as `"email.mask"`.
#[must_use]
pub fn transformed(property: &str, transformation: &str) -> String {
    format!("{property}.{transformation}")
}

/// Builds the masked projection of a property.
#[must_use]
pub fn masked(property: &str) -> String {
    transformed(property, MASK)
}

/// Reads the `id` field of a returned object.
#[must_use]
pub fn object_id(fields: &ObjectFields) -> Option<Uuid> {
    fields
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
}

/// Identifier of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId {
    /// Generated object id.
    pub id: Uuid,
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A page of objects returned by list and search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectFieldsPage {
    /// Objects in this page.
    #[serde(default)]
    pub results: Vec<ObjectFields>,

    /// Pagination state, present when the listing is paged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl ObjectFieldsPage {
    /// Returns the first object in the page.
    #[must_use]
    pub fn first(&self) -> Option<&ObjectFields> {
        self.results.first()
    }

    /// Returns the number of objects in the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Parameters for listing objects.
///
/// Without `props` the listing requests every property unmasked, which the
/// vault treats as a privileged, audited access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsParams {
    /// Restrict the listing to these ids.
    pub ids: Vec<Uuid>,

    /// Properties to return, optionally with a transformation suffix.
    pub props: Vec<String>,

    /// Maximum number of objects per page.
    pub page_size: Option<u32>,

    /// Cursor returned by a previous page.
    pub cursor: Option<String>,
}

impl ListObjectsParams {
    /// Creates list parameters returning every property.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to the given ids.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.ids = ids.into_iter().collect();
        self
    }

    /// Projects the listing onto the given properties.
    #[must_use]
    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props = props.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Continues from a previous page.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// True when every property is requested unmasked.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        self.props.is_empty()
    }
}

/// Exact-match search over object properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectQuery {
    /// Property values an object must equal to match.
    #[serde(rename = "match")]
    pub match_fields: ObjectFields,
}

impl ObjectQuery {
    /// Creates a query matching one property value.
    #[must_use]
    pub fn matching(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and(property, value)
    }

    /// Adds another property that must match.
    #[must_use]
    pub fn and(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.match_fields.insert(property.into(), value.into());
        self
    }
}

/// Outcome of a bulk add.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkObjectResult {
    /// True if every object was added.
    pub ok: bool,

    /// Per-object outcomes, in request order.
    #[serde(default)]
    pub results: Vec<BulkObjectItem>,
}

impl BulkObjectResult {
    /// Returns the ids of the objects that were added, in request order.
    #[must_use]
    pub fn ids(&self) -> Vec<Uuid> {
        self.results.iter().filter_map(|r| r.id).collect()
    }
}

/// Outcome of adding one object in a bulk request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkObjectItem {
    /// True if this object was added.
    pub ok: bool,

    /// Id of the added object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Why this object was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}
