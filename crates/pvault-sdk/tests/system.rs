//! Health checks and authentication against the fake vault.

mod common;

use common::Fixture;
use pvault_sdk::{Error, VaultClient};

#[tokio::test]
async fn test_both_planes_are_healthy() {
    let fixture = Fixture::start().await;
    let system = fixture.client.system();

    assert!(system.control_health().await.unwrap().is_pass());
    assert!(system.data_health().await.unwrap().is_pass());
    assert!(system.is_healthy().await.unwrap());
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let fixture = Fixture::start().await;
    let client = VaultClient::connect(&fixture.vault.base_url(), "wrong").unwrap();

    let err = client.collections().list().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }), "{err:?}");
    assert_eq!(err.error_code(), Some("PV1001"));
}
