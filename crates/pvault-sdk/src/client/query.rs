//! Query string assembly.

use std::fmt::Display;

/// Accumulates `key=value` query parameters.
///
/// Values are percent-encoded individually. List values are joined with a
/// literal comma, which is how the vault expects multi-valued parameters.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryParams {
    parts: Vec<String>,
}

impl QueryParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a single-valued parameter.
    pub(crate) fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        self.parts
            .push(format!("{key}={}", urlencoding::encode(&value)));
        self
    }

    /// Adds a comma-separated list parameter. Empty lists are skipped.
    pub(crate) fn push_list<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| urlencoding::encode(&v.to_string()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.parts.push(format!("{key}={joined}"));
        }
        self
    }

    /// Adds a parameter only when a value is present.
    pub(crate) fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Appends the query string to `path`.
    pub(crate) fn to_path(&self, path: &str) -> String {
        if self.parts.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.parts.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_leaves_path_alone() {
        assert_eq!(QueryParams::new().to_path("/a/b"), "/a/b");
    }

    #[test]
    fn test_lists_are_comma_joined_and_encoded() {
        let mut query = QueryParams::new();
        query
            .push("reason", "AppFunctionality")
            .push_list("props", ["email.mask", "ssn"])
            .push_list("ids", Vec::<String>::new())
            .push_opt("page_size", Some(1))
            .push_opt::<u32>("cursor", None)
            .push("tags", "a b");

        assert_eq!(
            query.to_path("/objects"),
            "/objects?reason=AppFunctionality&props=email.mask,ssn&page_size=1&tags=a%20b"
        );
    }
}
