//! In-memory state of the fake vault.
//!
//! Every observable rule the client depends on lives here: schema and object
//! validation, projection with transformations, archival, token selection and
//! rotation. Handlers only parse requests and call into [`VaultStore`].

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{VaultError, VaultResult};
use crate::masking;
use crate::model::{
    BulkItem, BulkResult, CollectionDef, DetokenizedOut, Fields, ObjectQuery, ObjectsPage, Paging,
    PropertyDef, QueryToken, Rotated, TokenMetadataOut, TokenRefOut, TokenType, TokenValue,
    TokenizeEntry, UpdateToken,
};

/// Data types accepted in collection schemas.
const DATA_TYPES: &[&str] = &[
    "ADDRESS",
    "BAN",
    "BOOLEAN",
    "BYTES",
    "CC_CVV",
    "CC_EXPIRATION_STRING",
    "CC_HOLDER_NAME",
    "CC_NUMBER",
    "DATE",
    "DATE_OF_BIRTH",
    "EMAIL",
    "FLOAT",
    "GENDER",
    "INTEGER",
    "IP_ADDRESS",
    "LONG_TEXT",
    "NAME",
    "NATIONALITY",
    "PASSPORT_NUMBER",
    "PHONE_NUMBER",
    "SSN",
    "STRING",
    "TIMESTAMP",
    "URL",
    "US_BANK_ACCOUNT_NUMBER",
    "US_BANK_ROUTING",
    "ZIP_CODE_US",
];

/// Built-in property every object carries.
const ID_PROPERTY: &str = "id";

/// Which properties an object read returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Every property, unmasked.
    All,
    /// The listed properties, each optionally suffixed with a transformation.
    Props(Vec<String>),
}

/// Parameters of an object listing.
#[derive(Debug, Clone)]
pub struct ListObjects {
    pub ids: Vec<Uuid>,
    pub projection: Projection,
    pub page_size: Option<usize>,
    pub cursor: Option<String>,
}

/// Exactly one token selection mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    TokenIds(Vec<String>),
    ObjectIds(Vec<Uuid>),
    Tags(Vec<String>),
}

#[derive(Debug, Clone)]
struct StoredObject {
    id: Uuid,
    fields: Fields,
    archived: bool,
}

#[derive(Debug, Clone)]
struct TokenRef {
    object_id: Option<Uuid>,
    props: Vec<String>,
}

#[derive(Debug, Clone)]
struct StoredToken {
    token_id: String,
    token_type: TokenType,
    tags: Vec<String>,
    refs: Vec<TokenRef>,
    fields: Fields,
    fingerprint: String,
    reversible: bool,
    creation_time: DateTime<Utc>,
    expiration_time: Option<DateTime<Utc>>,
    archived: bool,
}

impl StoredToken {
    fn is_archived(&self, now: DateTime<Utc>) -> bool {
        self.archived || self.expiration_time.is_some_and(|t| t <= now)
    }

    fn refers_to(&self, object_id: &Uuid) -> bool {
        self.refs.iter().any(|r| r.object_id.as_ref() == Some(object_id))
    }

    fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    fn metadata(&self) -> TokenMetadataOut {
        TokenMetadataOut {
            token_id: self.token_id.clone(),
            tokens: self
                .refs
                .iter()
                .map(|r| TokenRefOut {
                    object_id: r.object_id,
                    props: r.props.clone(),
                })
                .collect(),
            tags: self.tags.clone(),
            token_type: self.token_type,
            creation_time: self.creation_time,
            expiration_time: self.expiration_time,
        }
    }
}

#[derive(Debug, Clone)]
struct CollectionState {
    def: CollectionDef,
    objects: Vec<StoredObject>,
    tokens: Vec<StoredToken>,
}

impl CollectionState {
    fn object(&self, id: &Uuid) -> Option<&StoredObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    fn live_object(&self, id: &Uuid) -> VaultResult<&StoredObject> {
        self.object(id)
            .filter(|o| !o.archived)
            .ok_or_else(|| VaultError::not_found("Object", id))
    }

    fn object_archived(&self, token: &StoredToken) -> bool {
        token.refs.iter().any(|r| {
            r.object_id
                .and_then(|id| self.object(&id))
                .is_some_and(|o| o.archived)
        })
    }

    /// Indexes of the selected tokens, in selection order.
    ///
    /// Explicit token ids must all exist.
    fn select(&self, selector: &Selector) -> VaultResult<Vec<usize>> {
        match selector {
            Selector::TokenIds(ids) => {
                let mut selected = Vec::new();
                for id in ids {
                    let index = self
                        .tokens
                        .iter()
                        .position(|t| &t.token_id == id)
                        .ok_or_else(|| VaultError::not_found("Token", id))?;
                    if !selected.contains(&index) {
                        selected.push(index);
                    }
                }
                Ok(selected)
            }
            Selector::ObjectIds(ids) => Ok(self
                .tokens
                .iter()
                .enumerate()
                .filter(|(_, t)| ids.iter().any(|id| t.refers_to(id)))
                .map(|(i, _)| i)
                .collect()),
            Selector::Tags(tags) => Ok(self
                .tokens
                .iter()
                .enumerate()
                .filter(|(_, t)| t.has_any_tag(tags))
                .map(|(i, _)| i)
                .collect()),
        }
    }

    fn validate_projection(&self, projection: &Projection) -> VaultResult<()> {
        let Projection::Props(props) = projection else {
            return Ok(());
        };
        for prop in props {
            let (name, transformation) = split_prop(prop);
            if name == ID_PROPERTY && transformation.is_none() {
                continue;
            }
            if self.def.property(name).is_none() {
                return Err(VaultError::bad_request(format!("Unknown property '{name}'"))
                    .with_param("props", prop.as_str()));
            }
            if let Some(t) = transformation {
                if t != masking::MASK {
                    return Err(VaultError::bad_request(format!(
                        "Unsupported transformation '{t}'"
                    ))
                    .with_param("props", prop.as_str()));
                }
            }
        }
        Ok(())
    }

    fn project(&self, object: &StoredObject, projection: &Projection) -> VaultResult<Fields> {
        let mut out = Fields::new();
        match projection {
            Projection::All => {
                out.insert(ID_PROPERTY.to_string(), json!(object.id));
                for property in &self.def.properties {
                    let value = object.fields.get(&property.name).cloned().unwrap_or(Value::Null);
                    out.insert(property.name.clone(), value);
                }
            }
            Projection::Props(props) => {
                for prop in props {
                    let (name, transformation) = split_prop(prop);
                    if name == ID_PROPERTY {
                        out.insert(prop.clone(), json!(object.id));
                        continue;
                    }
                    let value = object.fields.get(name).cloned().unwrap_or(Value::Null);
                    let value = match (transformation, self.def.property(name)) {
                        (Some(t), Some(property)) => {
                            masking::transform(&property.data_type_name, t, &value)?
                        }
                        _ => value,
                    };
                    out.insert(prop.clone(), value);
                }
            }
        }
        Ok(out)
    }

    fn validate_object(&self, fields: &Fields) -> VaultResult<()> {
        for (name, value) in fields {
            let property = self.def.property(name).ok_or_else(|| {
                VaultError::bad_request(format!("Unknown property '{name}'"))
                    .with_param("property", name.as_str())
            })?;
            validate_value(property, value)?;
        }

        for property in &self.def.properties {
            let value = fields.get(&property.name).filter(|v| !v.is_null());
            match value {
                None if !property.is_nullable => {
                    return Err(VaultError::bad_request(format!(
                        "Property '{}' is not nullable",
                        property.name
                    ))
                    .with_param("property", property.name.as_str()));
                }
                Some(value) if property.is_unique => {
                    let taken = self
                        .objects
                        .iter()
                        .filter(|o| !o.archived)
                        .any(|o| o.fields.get(&property.name) == Some(value));
                    if taken {
                        return Err(VaultError::conflict("Property value", &property.name));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn insert_object(&mut self, fields: Fields) -> VaultResult<Uuid> {
        self.validate_object(&fields)?;
        let id = Uuid::new_v4();
        self.objects.push(StoredObject {
            id,
            fields,
            archived: false,
        });
        Ok(id)
    }
}

/// The fake vault's data, keyed by collection name.
#[derive(Debug, Default)]
pub struct VaultStore {
    collections: BTreeMap<String, CollectionState>,
}

impl VaultStore {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, name: &str) -> VaultResult<&CollectionState> {
        self.collections
            .get(name)
            .ok_or_else(|| VaultError::not_found("Collection", name))
    }

    fn collection_mut(&mut self, name: &str) -> VaultResult<&mut CollectionState> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| VaultError::not_found("Collection", name))
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub fn list_collections(&self) -> Vec<CollectionDef> {
        self.collections.values().map(|c| c.def.clone()).collect()
    }

    pub fn add_collection(&mut self, mut def: CollectionDef) -> VaultResult<CollectionDef> {
        validate_collection(&def)?;
        if self.collections.contains_key(&def.name) {
            return Err(VaultError::conflict("Collection", &def.name));
        }

        let now = Utc::now();
        def.creation_time = Some(now);
        def.modification_time = Some(now);

        self.collections.insert(
            def.name.clone(),
            CollectionState {
                def: def.clone(),
                objects: Vec::new(),
                tokens: Vec::new(),
            },
        );
        Ok(def)
    }

    pub fn get_collection(&self, name: &str) -> VaultResult<CollectionDef> {
        self.collection(name).map(|c| c.def.clone())
    }

    pub fn delete_collection(&mut self, name: &str) -> VaultResult<()> {
        self.collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| VaultError::not_found("Collection", name))
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    pub fn add_object(&mut self, collection: &str, fields: Fields) -> VaultResult<Uuid> {
        self.collection_mut(collection)?.insert_object(fields)
    }

    pub fn add_objects(&mut self, collection: &str, objects: Vec<Fields>) -> VaultResult<BulkResult> {
        let state = self.collection_mut(collection)?;
        let results: Vec<BulkItem> = objects
            .into_iter()
            .map(|fields| match state.insert_object(fields) {
                Ok(id) => BulkItem {
                    ok: true,
                    id: Some(id),
                    error: None,
                },
                Err(e) => BulkItem {
                    ok: false,
                    id: None,
                    error: Some(json!({
                        "error_code": e.error_code(),
                        "message": e.to_string(),
                    })),
                },
            })
            .collect();

        Ok(BulkResult {
            ok: results.iter().all(|r| r.ok),
            results,
        })
    }

    pub fn list_objects(&self, collection: &str, params: &ListObjects) -> VaultResult<ObjectsPage> {
        let state = self.collection(collection)?;
        state.validate_projection(&params.projection)?;

        let selected: Vec<&StoredObject> = if params.ids.is_empty() {
            state.objects.iter().filter(|o| !o.archived).collect()
        } else {
            params
                .ids
                .iter()
                .map(|id| state.live_object(id))
                .collect::<VaultResult<_>>()?
        };

        let offset = match params.cursor.as_deref().filter(|c| !c.is_empty()) {
            Some(cursor) => cursor.parse::<usize>().map_err(|_| {
                VaultError::bad_request("Invalid cursor").with_param("cursor", cursor)
            })?,
            None => 0,
        };
        let page_size = params.page_size.filter(|s| *s > 0).unwrap_or(selected.len());

        let page: Vec<&StoredObject> = selected.iter().skip(offset).take(page_size).copied().collect();
        let end = offset + page.len();
        let remaining_count = selected.len().saturating_sub(end);

        let results = page
            .into_iter()
            .map(|o| state.project(o, &params.projection))
            .collect::<VaultResult<Vec<_>>>()?;

        Ok(ObjectsPage {
            paging: Paging {
                cursor: if remaining_count > 0 {
                    end.to_string()
                } else {
                    String::new()
                },
                size: results.len(),
                remaining_count,
            },
            results,
        })
    }

    pub fn get_object(&self, collection: &str, id: &Uuid, projection: &Projection) -> VaultResult<Fields> {
        let state = self.collection(collection)?;
        state.validate_projection(projection)?;
        state.project(state.live_object(id)?, projection)
    }

    pub fn search_objects(
        &self,
        collection: &str,
        query: &ObjectQuery,
        projection: &Projection,
    ) -> VaultResult<ObjectsPage> {
        let state = self.collection(collection)?;
        state.validate_projection(projection)?;
        for name in query.match_fields.keys() {
            if name != ID_PROPERTY && state.def.property(name).is_none() {
                return Err(VaultError::bad_request(format!("Unknown property '{name}'"))
                    .with_param("match", name.as_str()));
            }
        }

        let results = state
            .objects
            .iter()
            .filter(|o| !o.archived)
            .filter(|o| {
                query.match_fields.iter().all(|(name, expected)| {
                    if name == ID_PROPERTY {
                        expected.as_str() == Some(o.id.to_string().as_str())
                    } else {
                        o.fields.get(name) == Some(expected)
                    }
                })
            })
            .map(|o| state.project(o, projection))
            .collect::<VaultResult<Vec<_>>>()?;

        Ok(ObjectsPage {
            paging: Paging {
                cursor: String::new(),
                size: results.len(),
                remaining_count: 0,
            },
            results,
        })
    }

    pub fn delete_object(&mut self, collection: &str, id: &Uuid) -> VaultResult<()> {
        let state = self.collection_mut(collection)?;
        let object = state
            .objects
            .iter_mut()
            .find(|o| &o.id == id && !o.archived)
            .ok_or_else(|| VaultError::not_found("Object", id))?;
        object.archived = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    pub fn tokenize(
        &mut self,
        collection: &str,
        entries: Vec<TokenizeEntry>,
        ttl: Option<i64>,
    ) -> VaultResult<Vec<TokenValue>> {
        let state = self.collection_mut(collection)?;
        let now = Utc::now();
        let expiration_time = ttl.map(|secs| expires_at(now, secs)).transpose()?;

        // Validate everything before issuing any token
        let mut resolved = Vec::with_capacity(entries.len());
        for entry in &entries {
            resolved.push(resolve_entry(state, entry)?);
        }

        let mut values = Vec::with_capacity(entries.len());
        for (entry, (object_id, fields)) in entries.into_iter().zip(resolved) {
            let fingerprint = fingerprint(&entry.props, &fields);

            if entry.token_type == TokenType::Deterministic {
                let existing = state.tokens.iter_mut().find(|t| {
                    t.token_type == TokenType::Deterministic
                        && t.fingerprint == fingerprint
                        && !t.is_archived(now)
                });
                if let Some(token) = existing {
                    if object_id.is_some() && !token.refs.iter().any(|r| r.object_id == object_id) {
                        token.refs.push(TokenRef {
                            object_id,
                            props: entry.props.clone(),
                        });
                    }
                    for tag in entry.tags {
                        if !token.tags.contains(&tag) {
                            token.tags.push(tag);
                        }
                    }
                    values.push(TokenValue {
                        token_id: token.token_id.clone(),
                    });
                    continue;
                }
            }

            let token_id = Uuid::new_v4().to_string();
            state.tokens.push(StoredToken {
                token_id: token_id.clone(),
                token_type: entry.token_type,
                tags: entry.tags,
                refs: vec![TokenRef {
                    object_id,
                    props: entry.props,
                }],
                fields,
                fingerprint,
                reversible: entry.reversible.unwrap_or(true),
                creation_time: now,
                expiration_time,
                archived: ttl == Some(0),
            });
            values.push(TokenValue { token_id });
        }

        Ok(values)
    }

    /// Resolves tokens back to their values.
    ///
    /// Archived tokens and tokens of archived objects are skipped unless
    /// `include_archived`. With `include_archived`, selecting a token that
    /// is itself archived is rejected whatever the selector; tokens whose
    /// object was deleted are returned.
    pub fn detokenize(
        &self,
        collection: &str,
        selector: &Selector,
        include_metadata: bool,
        include_archived: bool,
    ) -> VaultResult<Vec<DetokenizedOut>> {
        let state = self.collection(collection)?;
        let now = Utc::now();

        let mut out = Vec::new();
        for index in state.select(selector)? {
            let token = &state.tokens[index];
            let token_archived = token.is_archived(now);

            if token_archived || state.object_archived(token) {
                if !include_archived {
                    continue;
                }
                if token_archived {
                    return Err(VaultError::bad_request(format!(
                        "Token '{}' is archived and cannot be detokenized with the archived option",
                        token.token_id
                    ))
                    .with_param("token_id", token.token_id.as_str()));
                }
            }

            out.push(DetokenizedOut {
                token_id: token.token_id.clone(),
                fields: if token.reversible {
                    token.fields.clone()
                } else {
                    Fields::new()
                },
                metadata: include_metadata.then(|| token.metadata()),
            });
        }
        Ok(out)
    }

    pub fn search_tokens(&self, collection: &str, query: &QueryToken) -> VaultResult<Vec<TokenMetadataOut>> {
        let state = self.collection(collection)?;
        let now = Utc::now();

        Ok(state
            .tokens
            .iter()
            .filter(|t| !t.is_archived(now) && !state.object_archived(t))
            .filter(|t| query.token_ids.is_empty() || query.token_ids.contains(&t.token_id))
            .filter(|t| query.object_ids.is_empty() || query.object_ids.iter().any(|id| t.refers_to(id)))
            .filter(|t| query.tags.is_empty() || t.has_any_tag(&query.tags))
            .map(StoredToken::metadata)
            .collect())
    }

    pub fn update_tokens(
        &mut self,
        collection: &str,
        selector: &Selector,
        update: UpdateToken,
        ttl: Option<i64>,
    ) -> VaultResult<()> {
        let state = self.collection_mut(collection)?;
        let now = Utc::now();
        let expiration_time = ttl.map(|secs| expires_at(now, secs)).transpose()?;

        for index in state.select(selector)? {
            let token = &mut state.tokens[index];
            if let Some(tags) = &update.tags {
                token.tags.clone_from(tags);
            }
            if ttl == Some(0) {
                token.archived = true;
            }
            if expiration_time.is_some() {
                token.expiration_time = expiration_time;
            }
        }
        Ok(())
    }

    pub fn delete_tokens(&mut self, collection: &str, selector: &Selector) -> VaultResult<()> {
        let state = self.collection_mut(collection)?;
        let mut selected = state.select(selector)?;
        selected.sort_unstable();
        for index in selected.into_iter().rev() {
            state.tokens.remove(index);
        }
        Ok(())
    }

    /// Reissues tokens under new ids, keeping their tags, TTL and values.
    pub fn rotate_tokens(&mut self, collection: &str, token_ids: &[String]) -> VaultResult<Rotated> {
        if token_ids.is_empty() {
            return Err(VaultError::bad_request("token_ids is required"));
        }
        let state = self.collection_mut(collection)?;
        let selected = state.select(&Selector::TokenIds(token_ids.to_vec()))?;

        let mut rotated = Rotated::new();
        for index in selected {
            let token = &mut state.tokens[index];
            let new_id = Uuid::new_v4().to_string();
            rotated.insert(std::mem::replace(&mut token.token_id, new_id.clone()), new_id);
        }
        Ok(rotated)
    }
}

/// Splits `"email.mask"` into `("email", Some("mask"))`.
fn split_prop(prop: &str) -> (&str, Option<&str>) {
    match prop.split_once('.') {
        Some((name, transformation)) => (name, Some(transformation)),
        None => (prop, None),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_collection(def: &CollectionDef) -> VaultResult<()> {
    if !is_identifier(&def.name) {
        return Err(VaultError::bad_request(format!("Invalid collection name '{}'", def.name))
            .with_param("name", def.name.as_str()));
    }
    if !matches!(def.collection_type.as_str(), "PERSONS" | "DATA") {
        return Err(VaultError::bad_request(format!(
            "Invalid collection type '{}'",
            def.collection_type
        ))
        .with_param("type", def.collection_type.as_str()));
    }

    let mut seen: Vec<&str> = Vec::new();
    for property in &def.properties {
        if !is_identifier(&property.name) || property.name == ID_PROPERTY {
            return Err(VaultError::bad_request(format!(
                "Invalid property name '{}'",
                property.name
            ))
            .with_param("property", property.name.as_str()));
        }
        if seen.contains(&property.name.as_str()) {
            return Err(VaultError::bad_request(format!(
                "Duplicate property '{}'",
                property.name
            ))
            .with_param("property", property.name.as_str()));
        }
        if !DATA_TYPES.contains(&property.data_type_name.as_str()) {
            return Err(VaultError::bad_request(format!(
                "Unknown data type '{}'",
                property.data_type_name
            ))
            .with_param("data_type_name", property.data_type_name.as_str()));
        }
        seen.push(&property.name);
    }
    Ok(())
}

fn validate_value(property: &PropertyDef, value: &Value) -> VaultResult<()> {
    if value.is_null() {
        return Ok(());
    }
    let valid = match property.data_type_name.as_str() {
        "SSN" => value.as_str().is_some_and(is_ssn),
        "EMAIL" => value
            .as_str()
            .and_then(|s| s.split_once('@'))
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.')),
        "INTEGER" => value.is_i64() || value.is_u64(),
        "BOOLEAN" => value.is_boolean(),
        "FLOAT" => value.is_number(),
        _ => value.is_string(),
    };
    if valid {
        Ok(())
    } else {
        Err(VaultError::bad_request(format!(
            "Invalid value for property '{}' of type {}",
            property.name, property.data_type_name
        ))
        .with_param("property", property.name.as_str()))
    }
}

/// `ddd-dd-dddd`.
fn is_ssn(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == 3
        && groups
            .iter()
            .zip([3, 2, 4])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_digit()))
}

/// Resolves the object and values a tokenize entry refers to.
fn resolve_entry(state: &CollectionState, entry: &TokenizeEntry) -> VaultResult<(Option<Uuid>, Fields)> {
    if entry.props.is_empty() {
        return Err(VaultError::bad_request("props is required").with_param("props", json!([])));
    }
    for prop in &entry.props {
        if state.def.property(prop).is_none() {
            return Err(VaultError::bad_request(format!("Unknown property '{prop}'"))
                .with_param("props", prop.as_str()));
        }
    }

    let source = match (&entry.object.id, &entry.object.fields) {
        (Some(id), None) => &state.live_object(id)?.fields,
        (None, Some(fields)) => {
            for (name, value) in fields {
                let property = state.def.property(name).ok_or_else(|| {
                    VaultError::bad_request(format!("Unknown property '{name}'"))
                        .with_param("property", name.as_str())
                })?;
                validate_value(property, value)?;
            }
            fields
        }
        _ => {
            return Err(VaultError::bad_request(
                "Exactly one of object.id and object.fields is required",
            ))
        }
    };

    let fields = entry
        .props
        .iter()
        .map(|p| (p.clone(), source.get(p).cloned().unwrap_or(Value::Null)))
        .collect();
    Ok((entry.object.id, fields))
}

/// Identity of a deterministic token's values.
fn fingerprint(props: &[String], fields: &Fields) -> String {
    let mut props: Vec<&String> = props.iter().collect();
    props.sort();
    props
        .into_iter()
        .map(|p| format!("{p}={}", fields.get(p).unwrap_or(&Value::Null)))
        .collect::<Vec<_>>()
        .join(";")
}

/// Expiration of a token issued at `now` with a TTL of `secs`.
fn expires_at(now: DateTime<Utc>, secs: i64) -> VaultResult<DateTime<Utc>> {
    TimeDelta::try_seconds(secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| VaultError::bad_request("Invalid ttl").with_param("ttl", secs))
}
