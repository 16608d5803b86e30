//! Request handlers of the fake vault.
//!
//! Query values arrive percent-decoded; list parameters are comma-joined.

pub mod collections;
pub mod objects;
pub mod system;
pub mod tokens;

use std::collections::HashMap;

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{VaultError, VaultResult};
use crate::store::{Projection, Selector};

/// Raw query parameters.
pub type Params = HashMap<String, String>;

/// Decodes a JSON body, reporting malformed input as a bad request.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> VaultResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| VaultError::bad_request(format!("Invalid request body: {e}")))
}

/// Splits a comma-joined parameter, dropping empty items.
pub(crate) fn list(params: &Params, key: &str) -> Vec<String> {
    params
        .get(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn uuids(params: &Params, key: &str) -> VaultResult<Vec<Uuid>> {
    list(params, key)
        .iter()
        .map(|s| parse_uuid(s, key))
        .collect()
}

pub(crate) fn parse_uuid(value: &str, key: &str) -> VaultResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| {
        VaultError::bad_request(format!("Invalid id '{value}'")).with_param(key, value)
    })
}

/// Data-plane calls must state why they access the data.
pub(crate) fn require_reason(params: &Params) -> VaultResult<()> {
    match params.get("reason") {
        Some(reason) if !reason.trim().is_empty() => Ok(()),
        _ => Err(VaultError::bad_request("reason is required").with_param("reason", "")),
    }
}

pub(crate) fn has_option(params: &Params, option: &str) -> bool {
    list(params, "options").iter().any(|o| o == option)
}

/// Reads `props`, or every property when the unsafe option is set.
pub(crate) fn projection(params: &Params) -> VaultResult<Projection> {
    let props = list(params, "props");
    if !props.is_empty() {
        Ok(Projection::Props(props))
    } else if has_option(params, "unsafe") {
        Ok(Projection::All)
    } else {
        Err(VaultError::bad_request("props is required unless the unsafe option is set")
            .with_param("props", ""))
    }
}

pub(crate) fn optional_usize(params: &Params, key: &str) -> VaultResult<Option<usize>> {
    params
        .get(key)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse().map_err(|_| {
                VaultError::bad_request(format!("Invalid {key} '{v}'")).with_param(key, v.as_str())
            })
        })
        .transpose()
}

pub(crate) fn optional_ttl(params: &Params) -> VaultResult<Option<i64>> {
    params
        .get("ttl")
        .filter(|v| !v.is_empty())
        .map(|v| match v.parse::<i64>() {
            Ok(secs) if secs >= 0 => Ok(secs),
            _ => Err(VaultError::bad_request(format!("Invalid ttl '{v}'")).with_param("ttl", v.as_str())),
        })
        .transpose()
}

/// Reads the token selection mode. Exactly one mode must be present.
pub(crate) fn selector(params: &Params) -> VaultResult<Selector> {
    let token_ids = list(params, "token_ids");
    let object_ids = uuids(params, "object_ids")?;
    let tags = list(params, "tags");

    let present = [!token_ids.is_empty(), !object_ids.is_empty(), !tags.is_empty()]
        .into_iter()
        .filter(|p| *p)
        .count();
    if present != 1 {
        return Err(VaultError::bad_request(
            "Exactly one of token_ids, object_ids and tags is required",
        ));
    }

    Ok(if !token_ids.is_empty() {
        Selector::TokenIds(token_ids)
    } else if !object_ids.is_empty() {
        Selector::ObjectIds(object_ids)
    } else {
        Selector::Tags(tags)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_list_splits_and_trims() {
        let p = params(&[("props", "email, ssn.mask,,")]);
        assert_eq!(list(&p, "props"), vec!["email", "ssn.mask"]);
        assert!(list(&p, "missing").is_empty());
    }

    #[test]
    fn test_selector_needs_exactly_one_mode() {
        assert!(selector(&params(&[])).is_err());
        assert!(selector(&params(&[("token_ids", "a"), ("tags", "b")])).is_err());
        assert_eq!(
            selector(&params(&[("tags", "a,b")])).unwrap(),
            Selector::Tags(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_projection_requires_props_or_unsafe() {
        assert!(projection(&params(&[])).is_err());
        assert_eq!(projection(&params(&[("options", "unsafe")])).unwrap(), Projection::All);
    }

    #[test]
    fn test_reason_required() {
        assert!(require_reason(&params(&[])).is_err());
        assert!(require_reason(&params(&[("reason", "AppFunctionality")])).is_ok());
    }
}
