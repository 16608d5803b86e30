//! Object operations against the fake vault.

mod common;

use common::{eric, john, mary, object, Fixture, CUSTOMERS};
use pvault_sdk::{masked, object_id, Error, ListObjectsParams, ObjectQuery};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_masked_properties() {
    let fixture = Fixture::with_customers().await;
    let id = fixture.add(john()).await;

    let props = [masked("email"), masked("ssn"), masked("phone_number")];
    let props: Vec<&str> = props.iter().map(String::as_str).collect();
    let page = fixture
        .client
        .objects(CUSTOMERS)
        .get(&[id.id], &props)
        .await
        .unwrap();

    let fields = page.first().unwrap();
    assert_eq!(fields["email.mask"], "j***@somemail.com");
    assert_eq!(fields["ssn.mask"], "***-**-1234");
    assert_eq!(fields["phone_number.mask"], "+*-*****2123");
}

#[tokio::test]
async fn test_projection_returns_only_requested_props() {
    let fixture = Fixture::with_customers().await;
    let id = fixture.add(john()).await;

    let page = fixture
        .client
        .objects(CUSTOMERS)
        .get(&[id.id], &["ssn"])
        .await
        .unwrap();

    let fields = page.first().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["ssn"], "123-12-1234");
}

#[tokio::test]
async fn test_unsafe_read_returns_everything() {
    let fixture = Fixture::with_customers().await;
    let id = fixture.add(john()).await;

    let fields = fixture
        .client
        .objects(CUSTOMERS)
        .get_by_id(id.id, &[])
        .await
        .unwrap();

    assert_eq!(object_id(&fields), Some(id.id));
    for (key, value) in object(john()) {
        assert_eq!(fields[&key], value, "{key}");
    }
}

#[tokio::test]
async fn test_paged_listing() {
    let fixture = Fixture::with_customers().await;
    for customer in [john(), mary(), eric()] {
        fixture.add(customer).await;
    }
    let objects = fixture.client.objects(CUSTOMERS);

    let mut params = ListObjectsParams::new().with_page_size(2);
    let first = objects.list(&params).await.unwrap();
    let paging = first.paging.clone().unwrap();
    assert_eq!(first.len(), 2);
    assert!(paging.has_more());
    assert_eq!(paging.total(), 3);

    params = params.with_cursor(paging.cursor);
    let second = objects.list(&params).await.unwrap();
    assert_eq!(second.len(), 1);
    assert!(!second.paging.as_ref().unwrap().has_more());
    assert_eq!(second.first().unwrap()["email"], "eric@somemail.com");
}

#[tokio::test]
async fn test_search_by_exact_match() {
    let fixture = Fixture::with_customers().await;
    let john_id = fixture.add(john()).await;
    fixture.add(mary()).await;

    let page = fixture
        .client
        .objects(CUSTOMERS)
        .search(&ObjectQuery::matching("email", "john@somemail.com"), &["id"])
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.first().and_then(object_id), Some(john_id.id));
}

#[tokio::test]
async fn test_bulk_add_reports_each_object() {
    let fixture = Fixture::with_customers().await;

    let result = fixture
        .client
        .objects(CUSTOMERS)
        .add_bulk(&[
            object(john()),
            object(json!({"ssn": "not-an-ssn", "email": "x@y.com"})),
        ])
        .await
        .unwrap();

    assert!(!result.ok);
    assert_eq!(result.results.len(), 2);
    assert!(result.results[0].ok);
    assert!(!result.results[1].ok);
    assert_eq!(result.ids().len(), 1);
}

#[tokio::test]
async fn test_invalid_object_is_rejected() {
    let fixture = Fixture::with_customers().await;
    let objects = fixture.client.objects(CUSTOMERS);

    let err = objects
        .add(&object(json!({"ssn": "123-12-1234"})))
        .await
        .unwrap_err();
    assert!(err.is_bad_request(), "{err:?}");

    objects.add(&object(john())).await.unwrap();
    let err = objects.add(&object(john())).await.unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
}

#[tokio::test]
async fn test_deleted_object_is_not_found() {
    let fixture = Fixture::with_customers().await;
    let id = fixture.add(john()).await;
    let objects = fixture.client.objects(CUSTOMERS);

    objects.delete_by_id(id.id).await.unwrap();

    let err = objects.get(&[id.id], &[]).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "{err:?}");
    assert!(objects.delete_by_id(id.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_unknown_object_is_not_found() {
    let fixture = Fixture::with_customers().await;

    let err = fixture
        .client
        .objects(CUSTOMERS)
        .get_by_id(Uuid::new_v4(), &["email"])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
