//! Lookup views over token responses.
//!
//! The vault answers tokenize, search, rotate and detokenize with flat lists.
//! These adapters index those lists by object id and token id so callers can
//! correlate them with the objects they sent.

mod detokenize;
mod rotate;
mod search;
mod tokenize;

pub use detokenize::DetokenizeResult;
pub use rotate::RotateResult;
pub use search::SearchResult;
pub use tokenize::TokenizeResult;

use crate::models::ObjectFields;

/// Returns true if `actual` holds the same value as `expected` for every
/// property in `props`.
///
/// A property missing from both sides counts as a match.
#[must_use]
pub fn fields_match(expected: &ObjectFields, actual: &ObjectFields, props: &[&str]) -> bool {
    props.iter().all(|prop| expected.get(*prop) == actual.get(*prop))
}
