//! Collections service.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Collection;

use super::super::http::HttpClient;
use super::super::query::QueryParams;
use super::ctl;

/// Service for managing collection schemas.
#[derive(Clone)]
pub struct CollectionsService {
    http: Arc<HttpClient>,
}

impl CollectionsService {
    /// Creates a new collections service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    fn json_path(path: &str) -> String {
        let mut query = QueryParams::new();
        query.push("format", "json");
        query.to_path(&ctl(path))
    }

    fn named_path(name: &str) -> String {
        format!("collections/{}", urlencoding::encode(name))
    }

    /// Lists every collection in the vault.
    pub async fn list(&self) -> Result<Vec<Collection>> {
        self.http.get(&Self::json_path("collections")).await
    }

    /// Creates a collection.
    ///
    /// # Errors
    ///
    /// [`Error::Conflict`] if a collection with the same name exists,
    /// [`Error::Validation`] if the schema is rejected.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use pvault_sdk::{Collection, Property, VaultClient};
    /// # async fn example(client: VaultClient) -> Result<(), pvault_sdk::Error> {
    /// let customers = Collection::persons("customers")
    ///     .with_property(Property::new("ssn", "SSN").unique())
    ///     .with_property(Property::new("email", "EMAIL"))
    ///     .with_property(Property::new("phone", "PHONE_NUMBER").nullable());
    ///
    /// let created = client.collections().add(&customers).await?;
    /// println!("Created {} at {:?}", created.name, created.creation_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, collection: &Collection) -> Result<Collection> {
        self.http
            .post(&Self::json_path("collections"), collection)
            .await
            .map_err(Error::into_validation)
    }

    /// Gets a collection by name.
    pub async fn get(&self, name: &str) -> Result<Collection> {
        self.http
            .get(&Self::json_path(&Self::named_path(name)))
            .await
    }

    /// Deletes a collection. Deleting a missing collection is [`Error::NotFound`].
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.http.delete(&ctl(&Self::named_path(name))).await
    }

    /// Deletes a collection if it exists.
    ///
    /// Returns whether a collection was deleted. Errors other than
    /// [`Error::NotFound`] are propagated.
    pub async fn delete_if_exists(&self, name: &str) -> Result<bool> {
        match self.delete(name).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!(collection = name, "Collection already absent");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for CollectionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionsService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            CollectionsService::json_path("collections"),
            "/api/pvlt/1.0/ctl/collections?format=json"
        );
        assert_eq!(
            CollectionsService::json_path(&CollectionsService::named_path("customers")),
            "/api/pvlt/1.0/ctl/collections/customers?format=json"
        );
    }
}
