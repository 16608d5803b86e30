//! Objects service.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    BulkObjectResult, ListObjectsParams, ObjectFields, ObjectFieldsPage, ObjectId, ObjectQuery,
    Reason,
};

use super::super::http::HttpClient;
use super::super::query::QueryParams;
use super::collection_data;

/// Option requesting every property unmasked.
const UNSAFE_OPTION: &str = "unsafe";

/// Service for the objects of one collection.
#[derive(Clone)]
pub struct ObjectsService {
    http: Arc<HttpClient>,
    collection: String,
    reason: Reason,
}

impl ObjectsService {
    /// Creates a new objects service for a specific collection.
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

    /// Adds projection parameters, or the unsafe option when none are given.
    fn project(query: &mut QueryParams, props: &[impl AsRef<str>]) {
        if props.is_empty() {
            query.push("options", UNSAFE_OPTION);
        } else {
            query.push_list("props", props.iter().map(|p| p.as_ref()));
        }
    }

    /// Adds an object and returns its generated id.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use pvault_sdk::VaultClient;
    /// # use serde_json::json;
    /// # async fn example(client: VaultClient) -> Result<(), pvault_sdk::Error> {
    /// let fields = json!({
    ///     "ssn": "123-12-1234",
    ///     "email": "john@somemail.com",
    ///     "phone": "+1-121212123",
    ///     "zip_code_us": "12345"
    /// });
    ///
    /// let id = client
    ///     .objects("customers")
    ///     .add(fields.as_object().expect("object"))
    ///     .await?;
    /// println!("Added {id}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, fields: &ObjectFields) -> Result<ObjectId> {
        let path = self.query().to_path(&collection_data(&self.collection, "objects"));
        self.http.post(&path, fields).await
    }

    /// Adds several objects in one request.
    ///
    /// The vault validates each object independently; inspect
    /// [`BulkObjectResult::results`] for per-object failures.
    pub async fn add_bulk(&self, objects: &[ObjectFields]) -> Result<BulkObjectResult> {
        let path = self
            .query()
            .to_path(&collection_data(&self.collection, "objects/bulk"));
        self.http.post(&path, &objects).await
    }

    /// Lists objects.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use pvault_sdk::{masked, ListObjectsParams, VaultClient};
    /// # async fn example(client: VaultClient) -> Result<(), pvault_sdk::Error> {
    /// let params = ListObjectsParams::new()
    ///     .with_props([masked("email")])
    ///     .with_page_size(10);
    ///
    /// let page = client.objects("customers").list(&params).await?;
    /// for object in &page.results {
    ///     println!("{}", object["email.mask"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, params: &ListObjectsParams) -> Result<ObjectFieldsPage> {
        let mut query = self.query();
        query.push_list("ids", &params.ids);
        Self::project(&mut query, &params.props);
        query
            .push_opt("page_size", params.page_size)
            .push_opt("cursor", params.cursor.as_deref());

        let path = query.to_path(&collection_data(&self.collection, "objects"));
        self.http.get(&path).await
    }

    /// Gets objects by id, projected onto `props` (all properties when empty).
    pub async fn get(&self, ids: &[Uuid], props: &[&str]) -> Result<ObjectFieldsPage> {
        let params = ListObjectsParams::new()
            .with_ids(ids.iter().copied())
            .with_props(props.iter().copied());
        self.list(&params).await
    }

    /// Gets a single object by id.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) if the object does not
    /// exist or was deleted.
    pub async fn get_by_id(&self, id: Uuid, props: &[&str]) -> Result<ObjectFields> {
        let mut query = self.query();
        Self::project(&mut query, props);

        let path = query.to_path(&collection_data(&self.collection, &format!("objects/{id}")));
        self.http.get(&path).await
    }

    /// Finds objects whose properties equal the query values.
    pub async fn search(&self, query: &ObjectQuery, props: &[&str]) -> Result<ObjectFieldsPage> {
        let mut params = self.query();
        Self::project(&mut params, props);

        let path = params.to_path(&collection_data(&self.collection, "objects/query"));
        self.http.post(&path, query).await
    }

    /// Deletes an object. The object is archived, and later reads of it
    /// return [`Error::NotFound`](crate::Error::NotFound).
    pub async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let path = self
            .query()
            .to_path(&collection_data(&self.collection, &format!("objects/{id}")));
        self.http.delete(&path).await
    }
}

impl std::fmt::Debug for ObjectsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectsService")
            .field("collection", &self.collection)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
