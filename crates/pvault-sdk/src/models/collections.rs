//! Collection and property models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named schema of typed properties, analogous to a table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name, unique across the vault.
    pub name: String,

    /// Collection type.
    #[serde(rename = "type")]
    pub collection_type: CollectionType,

    /// Ordered property definitions.
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Set by the vault on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Set by the vault on modification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<DateTime<Utc>>,
}

impl Collection {
    /// Creates an empty collection definition.
    #[must_use]
    pub fn new(name: impl Into<String>, collection_type: CollectionType) -> Self {
        Self {
            name: name.into(),
            collection_type,
            properties: Vec::new(),
            creation_time: None,
            modification_time: None,
        }
    }

    /// Creates an empty `PERSONS` collection definition.
    #[must_use]
    pub fn persons(name: impl Into<String>) -> Self {
        Self::new(name, CollectionType::Persons)
    }

    /// Creates an empty `DATA` collection definition.
    #[must_use]
    pub fn data(name: impl Into<String>) -> Self {
        Self::new(name, CollectionType::Data)
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the property names in schema order.
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    /// Personal data about people.
    Persons,
    /// Any other sensitive data.
    Data,
}

impl std::fmt::Display for CollectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persons => write!(f, "PERSONS"),
            Self::Data => write!(f, "DATA"),
        }
    }
}

/// Schema row for one field of every object in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name.
    pub name: String,

    /// Data type name, e.g. `SSN`, `EMAIL`, `PHONE_NUMBER`.
    #[serde(alias = "pii_type_name")]
    pub data_type_name: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Values must be unique across the collection.
    #[serde(default)]
    pub is_unique: bool,

    /// The property may be left empty.
    #[serde(default)]
    pub is_nullable: bool,

    /// Values are stored encrypted.
    #[serde(default)]
    pub is_encrypted: bool,

    /// Values are indexed for search.
    #[serde(default)]
    pub is_index: bool,
}

impl Property {
    /// Creates a property with all flags off.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type_name: data_type_name.into(),
            description: None,
            is_unique: false,
            is_nullable: false,
            is_encrypted: false,
            is_index: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the property unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Marks the property nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Marks the property encrypted.
    #[must_use]
    pub fn encrypted(mut self) -> Self {
        self.is_encrypted = true;
        self
    }

    /// Marks the property indexed.
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.is_index = true;
        self
    }
}
