//! Collection lifecycle against the fake vault.

mod common;

use common::{customers, Fixture, CUSTOMERS};
use pvault_sdk::{Collection, CollectionType, Error, Property};

#[tokio::test]
async fn test_add_get_list_delete() {
    let fixture = Fixture::start().await;
    let collections = fixture.client.collections();
    assert!(collections.list().await.unwrap().is_empty());

    let created = collections.add(&customers()).await.unwrap();
    assert_eq!(created.name, CUSTOMERS);
    assert!(created.creation_time.is_some());

    let fetched = collections.get(CUSTOMERS).await.unwrap();
    assert_eq!(fetched.collection_type, CollectionType::Persons);
    assert_eq!(
        fetched.property_names(),
        ["ssn", "email", "phone_number", "zip_code_us"]
    );
    assert!(fetched.property("ssn").unwrap().is_unique);

    assert_eq!(collections.list().await.unwrap().len(), 1);

    collections.delete(CUSTOMERS).await.unwrap();
    assert!(collections.get(CUSTOMERS).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_duplicate_collection_conflicts() {
    let fixture = Fixture::with_customers().await;

    let err = fixture.client.collections().add(&customers()).await.unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
    assert_eq!(err.error_code(), Some("PV1004"));
}

#[tokio::test]
async fn test_malformed_schema_is_validation_error() {
    let fixture = Fixture::start().await;

    let bad = Collection::persons("people").with_property(Property::new("id", "STRING"));
    let err = fixture.client.collections().add(&bad).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "{err:?}");
}

#[tokio::test]
async fn test_double_delete_is_not_found() {
    let fixture = Fixture::with_customers().await;
    let collections = fixture.client.collections();

    collections.delete(CUSTOMERS).await.unwrap();
    assert!(collections.delete(CUSTOMERS).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_if_exists() {
    let fixture = Fixture::with_customers().await;
    let collections = fixture.client.collections();

    assert!(collections.delete_if_exists(CUSTOMERS).await.unwrap());
    assert!(!collections.delete_if_exists(CUSTOMERS).await.unwrap());
}
