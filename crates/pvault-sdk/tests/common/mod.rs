//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use pvault_sdk::{Collection, ObjectFields, ObjectId, Property, VaultClient};
use pvault_testkit::FakeVault;
use serde_json::{json, Value};

pub const CUSTOMERS: &str = "customers";

/// A running fake vault and a client connected to it.
pub struct Fixture {
    pub vault: FakeVault,
    pub client: VaultClient,
}

impl Fixture {
    pub async fn start() -> Self {
        let vault = FakeVault::start().await.unwrap();
        let client = VaultClient::connect(&vault.base_url(), vault.token()).unwrap();
        Self { vault, client }
    }

    /// Starts a vault holding an empty `customers` collection.
    pub async fn with_customers() -> Self {
        let fixture = Self::start().await;
        fixture.client.collections().add(&customers()).await.unwrap();
        fixture
    }

    pub async fn add(&self, fields: Value) -> ObjectId {
        self.client
            .objects(CUSTOMERS)
            .add(&object(fields))
            .await
            .unwrap()
    }
}

pub fn customers() -> Collection {
    Collection::persons(CUSTOMERS)
        .with_property(Property::new("ssn", "SSN").unique())
        .with_property(Property::new("email", "EMAIL"))
        .with_property(Property::new("phone_number", "PHONE_NUMBER").nullable())
        .with_property(Property::new("zip_code_us", "ZIP_CODE_US").nullable())
}

pub fn object(fields: Value) -> ObjectFields {
    fields.as_object().cloned().unwrap()
}

pub fn john() -> Value {
    json!({
        "ssn": "123-12-1234",
        "email": "john@somemail.com",
        "phone_number": "+1-121212123",
        "zip_code_us": "12345"
    })
}

pub fn mary() -> Value {
    json!({
        "ssn": "123-12-1235",
        "email": "mary@somemail.com",
        "phone_number": "+1-121212124",
        "zip_code_us": "12345"
    })
}

pub fn eric() -> Value {
    json!({
        "ssn": "123-12-1236",
        "email": "eric@somemail.com",
        "phone_number": "+1-121212125",
        "zip_code_us": "12345"
    })
}
