//! The walkthrough steps.
//!
//! Each step checks what the vault returned and stops at the first
//! surprise. Steps 1 and 2 (installing and starting the vault) happen
//! outside this program.

use pvault_sdk::{
    masked, object_id, Collection, DetokenizeOptions, DetokenizeResult, ListObjectsParams,
    ObjectFields, ObjectQuery, Property, QueryToken, SearchResult, TokenSelector, TokenType,
    TokenizeRequest, TokenizeResult, VaultClient,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ensure, DriverError, DriverResult};

/// Collection the walkthrough creates.
pub const COLLECTION_NAME: &str = "customers";

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Ids of the customers added in step 4, in insertion order.
    pub customer_ids: Vec<Uuid>,
    /// Token issued for the first customer's email, deleted in step 7.
    pub token_id: String,
}

/// Runs every step against the vault behind `client`.
pub async fn run(client: &VaultClient) -> DriverResult<Outcome> {
    check_health(client).await?;
    check_clear(client).await?;
    create_collection(client).await?;
    let customers = add_data(client).await?;
    let token_id = tokenize_data(client, &customers).await?;
    query_data(client, &customers).await?;
    delete_data(client, &customers[0], &token_id).await?;

    info!("Done!");
    Ok(Outcome {
        customer_ids: customers.iter().map(|c| c.id).collect(),
        token_id,
    })
}

/// A customer added in step 4.
#[derive(Debug, Clone)]
struct Customer {
    id: Uuid,
    fields: ObjectFields,
}

impl Customer {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

fn customer_fields(ssn: &str, email: &str, phone_number: &str) -> ObjectFields {
    let mut fields = ObjectFields::new();
    fields.insert("ssn".into(), ssn.into());
    fields.insert("email".into(), email.into());
    fields.insert("phone_number".into(), phone_number.into());
    fields.insert("zip_code_us".into(), "12345".into());
    fields
}

fn customers_collection() -> Collection {
    Collection::persons(COLLECTION_NAME)
        .with_property(
            Property::new("ssn", "SSN")
                .unique()
                .with_description("Social security number"),
        )
        .with_property(Property::new("email", "EMAIL"))
        .with_property(Property::new("phone_number", "PHONE_NUMBER").nullable())
        .with_property(Property::new("zip_code_us", "ZIP_CODE_US").nullable())
}

async fn check_health(client: &VaultClient) -> DriverResult<()> {
    let unreachable = |source: pvault_sdk::Error| {
        if source.is_connection() {
            DriverError::Unreachable {
                address: client.base_url().to_string(),
                source,
            }
        } else {
            DriverError::Vault(source)
        }
    };

    let control = client.system().control_health().await.map_err(unreachable)?;
    if !control.is_pass() {
        return Err(DriverError::Unhealthy {
            plane: "control",
            status: control.status,
        });
    }

    let data = client.system().data_health().await.map_err(unreachable)?;
    if !data.is_pass() {
        return Err(DriverError::Unhealthy {
            plane: "data",
            status: data.status,
        });
    }

    info!(address = client.base_url(), "Vault is healthy");
    Ok(())
}

/// Refuses to run against a vault that already holds collections.
async fn check_clear(client: &VaultClient) -> DriverResult<()> {
    let collections = client.collections().list().await?;
    if !collections.is_empty() {
        return Err(DriverError::VaultNotEmpty {
            collections: collections.into_iter().map(|c| c.name).collect(),
        });
    }
    Ok(())
}

async fn create_collection(client: &VaultClient) -> DriverResult<()> {
    info!("== Step 3: Create a collection ==");

    let created = client.collections().add(&customers_collection()).await?;
    let fetched = client.collections().get(&created.name).await?;
    ensure(fetched.property_names() == ["ssn", "email", "phone_number", "zip_code_us"], || {
        format!("unexpected properties {:?}", fetched.property_names())
    })?;

    info!(collection = %fetched.name, properties = fetched.properties.len(), "Collection created");
    Ok(())
}

async fn add_data(client: &VaultClient) -> DriverResult<Vec<Customer>> {
    info!("== Step 4: Add data ==");

    let objects = client.objects(COLLECTION_NAME);
    let mut customers = Vec::new();
    for fields in [
        customer_fields("123-12-1234", "john@somemail.com", "+1-121212123"),
        customer_fields("123-12-1235", "mary@somemail.com", "+1-121212124"),
        customer_fields("123-12-1236", "eric@somemail.com", "+1-121212125"),
    ] {
        let id = objects.add(&fields).await?;
        info!(%id, "Customer added");
        customers.push(Customer { id: id.id, fields });
    }

    let found = objects
        .search(&ObjectQuery::matching("email", "john@somemail.com"), &["id"])
        .await?;
    let found_id = found.first().and_then(object_id);
    ensure(found_id == Some(customers[0].id), || {
        format!("search by email returned {found_id:?}, expected {}", customers[0].id)
    })?;

    Ok(customers)
}

/// Tokenizes the first customer's email and resolves it back.
async fn tokenize_data(client: &VaultClient, customers: &[Customer]) -> DriverResult<String> {
    info!("== Step 5: Tokenize data ==");

    let tokens = client.tokens(COLLECTION_NAME);
    let john = &customers[0];

    let request = TokenizeRequest::for_object(john.id, TokenType::Pointer).with_props(["email"]);
    let tokenized = TokenizeResult::new(vec![john.id], tokens.tokenize(&[request]).await?)?;
    let token_id = tokenized
        .token_id(&john.id)
        .map(str::to_string)
        .ok_or_else(|| DriverError::expectation("no token issued for the customer"))?;
    info!(token = %token_id, "Token issued");

    let search = SearchResult::new(
        tokens
            .search(&QueryToken::from(TokenSelector::object_ids([john.id])))
            .await?,
    );
    ensure(search.token_id(&john.id) == Some(token_id.as_str()), || {
        format!("token search returned {:?}, expected {token_id}", search.token_ids())
    })?;

    let detokenized = DetokenizeResult::new(
        tokens
            .detokenize(
                &TokenSelector::token_ids([token_id.clone()]),
                DetokenizeOptions::default(),
            )
            .await?,
    );
    ensure(detokenized.len() == 1, || {
        format!("expected one detokenized value, got {}", detokenized.len())
    })?;
    let email = detokenized
        .fields(&token_id)
        .and_then(|f| f.get("email"))
        .and_then(|v| v.as_str());
    ensure(email == john.field("email"), || {
        format!("token resolved to {email:?}, expected {:?}", john.field("email"))
    })?;

    Ok(token_id)
}

/// Reads the customers back: paged, projected, in full and masked.
async fn query_data(client: &VaultClient, customers: &[Customer]) -> DriverResult<()> {
    info!("== Step 6: Query your data ==");

    let objects = client.objects(COLLECTION_NAME);
    let john = &customers[0];

    let page = objects
        .list(&ListObjectsParams::new().with_page_size(1))
        .await?;
    let paging = page
        .paging
        .as_ref()
        .ok_or_else(|| DriverError::expectation("paged listing carried no paging"))?;
    ensure(paging.has_more(), || "first page has no cursor".to_string())?;
    ensure(paging.total() == customers.len() as u64, || {
        format!("listing counted {} customers, expected {}", paging.total(), customers.len())
    })?;
    let listed = page
        .first()
        .ok_or_else(|| DriverError::expectation("first page is empty"))?;
    let original = object_id(listed)
        .and_then(|id| customers.iter().find(|c| c.id == id))
        .ok_or_else(|| DriverError::expectation("listed an unknown customer"))?;
    ensure(listed.get("email") == original.fields.get("email"), || {
        "listed email differs from the stored one".to_string()
    })?;
    debug!(?listed, "First page");

    // Only the SSN
    let ssn_only = objects.get(&[john.id], &["ssn"]).await?;
    let ssn = ssn_only
        .first()
        .ok_or_else(|| DriverError::expectation("ssn projection returned nothing"))?;
    ensure(ssn.len() == 1 && ssn.get("ssn") == john.fields.get("ssn"), || {
        format!("ssn projection returned {ssn:?}")
    })?;
    info!(?ssn, "SSN of the first customer");

    // Every field
    let full = objects.get(&[john.id], &[]).await?;
    let full = full
        .first()
        .ok_or_else(|| DriverError::expectation("full read returned nothing"))?;
    ensure(full.get("email") == john.fields.get("email"), || {
        format!("full read returned {full:?}")
    })?;
    info!(?full, "First customer");

    // Masked
    let masked_props = [masked("ssn"), masked("email"), masked("phone_number")];
    let props: Vec<&str> = masked_props.iter().map(String::as_str).collect();
    let masked_page = objects.get(&[john.id], &props).await?;
    let masked_fields = masked_page
        .first()
        .ok_or_else(|| DriverError::expectation("masked read returned nothing"))?;
    let masked_ssn = masked_fields.get(&masked("ssn")).and_then(|v| v.as_str());
    ensure(masked_ssn == Some("***-**-1234"), || {
        format!("masked ssn is {masked_ssn:?}")
    })?;
    let masked_email = masked_fields.get(&masked("email")).and_then(|v| v.as_str());
    ensure(masked_email == Some("j***@somemail.com"), || {
        format!("masked email is {masked_email:?}")
    })?;
    info!(fields = ?masked_fields, "First customer, masked");

    Ok(())
}

/// Deletes the token and the customer, then checks both are gone.
async fn delete_data(client: &VaultClient, customer: &Customer, token_id: &str) -> DriverResult<()> {
    info!("== Step 7: Delete data ==");

    let tokens = client.tokens(COLLECTION_NAME);
    tokens.delete(&TokenSelector::token_ids([token_id])).await?;

    let remaining = tokens
        .search(&QueryToken::from(TokenSelector::object_ids([customer.id])))
        .await?;
    ensure(remaining.is_empty(), || {
        format!("{} tokens left after delete", remaining.len())
    })?;

    let objects = client.objects(COLLECTION_NAME);
    objects.delete_by_id(customer.id).await?;

    match objects.get(&[customer.id], &[]).await {
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(e.into()),
        Ok(_) => Err(DriverError::expectation("Object still exists!")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_schema() {
        let collection = customers_collection();
        assert_eq!(collection.name, COLLECTION_NAME);
        assert!(collection.property("ssn").unwrap().is_unique);
        assert!(collection.property("phone_number").unwrap().is_nullable);
        assert!(!collection.property("email").unwrap().is_nullable);
    }

    #[test]
    fn test_customer_fields() {
        let fields = customer_fields("123-12-1234", "john@somemail.com", "+1-121212123");
        assert_eq!(fields.len(), 4);
        assert_eq!(fields["zip_code_us"], "12345");
    }
}
