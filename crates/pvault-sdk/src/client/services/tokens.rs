//! Tokens service.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    DetokenizeOptions, DetokenizedToken, QueryToken, Reason, RotatedTokens, TokenMetadata,
    TokenSelector, TokenValue, TokenizeRequest, Ttl, UpdateTokenRequest,
};

use super::super::http::HttpClient;
use super::super::query::QueryParams;
use super::collection_data;

/// Service for the tokens of one collection.
///
/// Operations that act on existing tokens take a [`TokenSelector`]; only the
/// selected mode is sent to the vault.
#[derive(Clone)]
pub struct TokensService {
    http: Arc<HttpClient>,
    collection: String,
    reason: Reason,
}

impl TokensService {
    /// Creates a new tokens service for a specific collection.
    pub(crate) fn new(http: Arc<HttpClient>, collection: String, reason: Reason) -> Self {
        Self {
            http,
            collection,
            reason,
        }
    }

    /// Returns the collection this service operates on.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns a copy of this service sending a different access reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Reason>) -> Self {
        self.reason = reason.into();
        self
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("reason", &self.reason);
        query
    }

    fn selected(&self, selector: &TokenSelector) -> Result<QueryParams> {
        if selector.is_empty() {
            return Err(Error::config(format!(
                "token selector '{}' must not be empty",
                selector.query_key()
            )));
        }
        let mut query = self.query();
        query.push_list(selector.query_key(), selector.values());
        Ok(query)
    }

    fn path(&self, path: &str) -> String {
        collection_data(&self.collection, path)
    }

    /// Tokenizes objects or inline values.
    ///
    /// The returned tokens are in request order: `result[i]` is the token for
    /// `requests[i]`.
    ///
    /// # Errors
    ///
    /// [`Error::ResponseMismatch`] if the vault returns a different number of
    /// tokens than requested.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use pvault_sdk::{TokenizeRequest, TokenType, VaultClient};
    /// # async fn example(client: VaultClient, id: uuid::Uuid) -> Result<(), pvault_sdk::Error> {
    /// let request = TokenizeRequest::for_object(id, TokenType::Pointer)
    ///     .with_props(["email"])
    ///     .with_tags(["marketing"]);
    ///
    /// let tokens = client.tokens("customers").tokenize(&[request]).await?;
    /// println!("Token: {}", tokens[0].token_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn tokenize(&self, requests: &[TokenizeRequest]) -> Result<Vec<TokenValue>> {
        self.tokenize_with(requests, self.query()).await
    }

    /// Tokenizes with an explicit time-to-live.
    pub async fn tokenize_with_ttl(
        &self,
        requests: &[TokenizeRequest],
        ttl: &Ttl,
    ) -> Result<Vec<TokenValue>> {
        let mut query = self.query();
        query.push("ttl", ttl);
        self.tokenize_with(requests, query).await
    }

    async fn tokenize_with(
        &self,
        requests: &[TokenizeRequest],
        query: QueryParams,
    ) -> Result<Vec<TokenValue>> {
        let tokens: Vec<TokenValue> = self
            .http
            .post(&query.to_path(&self.path("tokens")), &requests)
            .await?;

        if tokens.len() != requests.len() {
            return Err(Error::ResponseMismatch {
                expected: requests.len(),
                actual: tokens.len(),
            });
        }
        Ok(tokens)
    }

    /// Resolves tokens back to their values.
    ///
    /// Archived tokens and tokens of archived objects are left out unless
    /// `options.include_archived` is set. With that flag, a selection that
    /// contains an archived token is rejected with [`Error::BadRequest`]
    /// whatever the selector mode. Tokens of deleted objects are returned.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the selector is empty.
    pub async fn detokenize(
        &self,
        selector: &TokenSelector,
        options: DetokenizeOptions,
    ) -> Result<Vec<DetokenizedToken>> {
        let mut query = self.selected(selector)?;
        query.push_list("options", options.options());

        self.http
            .get(&query.to_path(&self.path("tokens")))
            .await
    }

    /// Returns the metadata of every live token matching the query.
    pub async fn search(&self, query: &QueryToken) -> Result<Vec<TokenMetadata>> {
        self.http
            .post(&self.query().to_path(&self.path("tokens/query")), query)
            .await
    }

    /// Updates tags and optionally the TTL of the selected tokens.
    pub async fn update(
        &self,
        selector: &TokenSelector,
        request: &UpdateTokenRequest,
        ttl: Option<&Ttl>,
    ) -> Result<()> {
        let mut query = self.selected(selector)?;
        query.push_opt("ttl", ttl);

        self.http
            .patch(&query.to_path(&self.path("tokens")), request)
            .await
    }

    /// Archives the selected tokens by expiring them immediately.
    pub async fn archive(&self, selector: &TokenSelector) -> Result<()> {
        debug!(mode = selector.query_key(), "Archiving tokens");
        self.update(selector, &UpdateTokenRequest::new(), Some(&Ttl::expired()))
            .await
    }

    /// Permanently deletes the selected tokens.
    pub async fn delete(&self, selector: &TokenSelector) -> Result<()> {
        self.http
            .delete(&self.selected(selector)?.to_path(&self.path("tokens")))
            .await
    }

    /// Reissues tokens under new ids.
    ///
    /// Returns a map from each old token id to its replacement. The old ids
    /// stop resolving: detokenizing them afterwards is
    /// [`Error::NotFound`].
    pub async fn rotate<S: AsRef<str>>(&self, token_ids: &[S]) -> Result<RotatedTokens> {
        let mut query = self.query();
        query.push_list("token_ids", token_ids.iter().map(|id| id.as_ref()));

        self.http
            .post_empty(&query.to_path(&self.path("tokens/rotate")))
            .await
    }
}

impl std::fmt::Debug for TokensService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokensService")
            .field("collection", &self.collection)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
