//! Getting-started walkthrough for the vault.
//!
//! Creates a `customers` collection, adds three customers, tokenizes an
//! email, reads the data back in several shapes and deletes it again.
//! The vault must be empty before the run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod workflow;

pub use error::{DriverError, DriverResult};
pub use workflow::{run, Outcome, COLLECTION_NAME};
