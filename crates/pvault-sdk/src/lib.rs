//! # pvault SDK
//!
//! Typed async client for a PII vault. The vault stores sensitive objects in
//! schema-typed collections and issues tokens that stand in for their values.
//! This crate is a thin façade over the vault's REST API; all storage,
//! encryption and tokenization happen server-side.
//!
//! ## Features
//!
//! - **Typed models** for collections, objects and tokens
//! - **Async-first design** built on reqwest
//! - **Typed errors** decoded from the vault's error bodies
//! - **Result adapters** indexing token responses by object and token id
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pvault_sdk::{TokenSelector, TokenizeRequest, TokenType, VaultClient, DetokenizeOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pvault_sdk::Error> {
//!     let client = VaultClient::connect("http://localhost:8123", "pvaultauth")?;
//!
//!     let fields = json!({"email": "john@somemail.com"});
//!     let id = client
//!         .objects("customers")
//!         .add(fields.as_object().expect("object"))
//!         .await?;
//!
//!     let tokens = client
//!         .tokens("customers")
//!         .tokenize(&[TokenizeRequest::for_object(id.id, TokenType::Pointer).with_props(["email"])])
//!         .await?;
//!
//!     let values = client
//!         .tokens("customers")
//!         .detokenize(
//!             &TokenSelector::token_ids([tokens[0].token_id.clone()]),
//!             DetokenizeOptions::default(),
//!         )
//!         .await?;
//!     println!("{}", values[0].fields["email"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, pvault_sdk::Error>`:
//!
//! ```rust,no_run
//! # use pvault_sdk::VaultClient;
//! # async fn example(client: VaultClient) {
//! match client.collections().get("customers").await {
//!     Ok(collection) => println!("Found: {}", collection.name),
//!     Err(pvault_sdk::Error::NotFound { .. }) => println!("Collection not found"),
//!     Err(e) if e.is_connection() => eprintln!("{e}"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod results;

// Re-export main types
pub use client::{
    CollectionsService, ObjectsService, SystemService, TokensService, VaultClient,
    VaultClientBuilder, VaultConfig,
};
pub use error::{ApiError, Error, Result};

// Re-export model types for convenience
pub use models::{
    masked, object_id, transformed, BulkObjectItem, BulkObjectResult, Collection, CollectionType,
    DetokenizeOptions, DetokenizedToken, HealthStatus, InputObject, ListObjectsParams,
    ObjectFields, ObjectFieldsPage, ObjectId, ObjectQuery, Paging, Property, QueryToken, Reason,
    RotatedTokens, TokenMetadata, TokenRefMetadata, TokenSelector, TokenType, TokenValue,
    TokenizeRequest, Ttl, UpdateTokenRequest, MASK,
};
pub use results::{DetokenizeResult, RotateResult, SearchResult, TokenizeResult};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent string for API requests
pub const USER_AGENT: &str = concat!("pvault-sdk-rust/", env!("CARGO_PKG_VERSION"));
