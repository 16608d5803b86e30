//! Data models for the vault client.
//!
//! This module contains the request and response types mirrored from the
//! vault's wire contract.

mod collections;
mod common;
mod objects;
mod tokens;

pub use collections::*;
pub use common::*;
pub use objects::*;
pub use tokens::*;
