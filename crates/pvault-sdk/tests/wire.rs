//! Request and response shapes, checked against a mock server.

use pvault_sdk::{
    Collection, DetokenizeOptions, Error, ListObjectsParams, Property, TokenSelector, TokenType,
    TokenizeRequest, Ttl, UpdateTokenRequest, VaultClient,
};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{any, body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKENS: &str = "/api/pvlt/1.0/data/collections/customers/tokens";

async fn setup() -> (MockServer, VaultClient) {
    let server = MockServer::start().await;
    let client = VaultClient::connect(&server.uri(), "pvaultauth").unwrap();
    (server, client)
}

#[tokio::test]
async fn test_health_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pvlt/1.0/ctl/info/health"))
        .and(header("authorization", "Bearer pvaultauth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pass"})))
        .expect(1)
        .mount(&server)
        .await;

    let health = client.system().control_health().await.unwrap();
    assert!(health.is_pass());
}

#[tokio::test]
async fn test_list_collections_asks_for_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pvlt/1.0/ctl/collections"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "customers", "type": "PERSONS", "properties": [
                {"name": "email", "data_type_name": "EMAIL"}
            ]}
        ])))
        .mount(&server)
        .await;

    let collections = client.collections().list().await.unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].property_names(), ["email"]);
}

#[tokio::test]
async fn test_schema_rejection_is_validation_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/pvlt/1.0/ctl/collections"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_code": "PV1000",
            "message": "Unknown data type 'NOPE'",
            "context": {"data_type_name": "NOPE"}
        })))
        .mount(&server)
        .await;

    let collection = Collection::data("bad").with_property(Property::new("x", "NOPE"));
    let err = client.collections().add(&collection).await.unwrap_err();

    let Error::Validation { error } = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(error.status, 400);
    assert_eq!(error.error_code.as_deref(), Some("PV1000"));
    assert_eq!(error.context["data_type_name"], "NOPE");
}

#[tokio::test]
async fn test_error_statuses_map_to_variants() {
    let (server, client) = setup().await;

    for (name, status) in [("a", 404), ("b", 409), ("c", 422), ("d", 403), ("e", 503)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/pvlt/1.0/ctl/collections/{name}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": "nope"})))
            .mount(&server)
            .await;
    }

    let collections = client.collections();
    assert!(collections.get("a").await.unwrap_err().is_not_found());
    assert!(collections.get("b").await.unwrap_err().is_conflict());
    assert!(matches!(collections.get("c").await, Err(Error::Validation { .. })));
    assert!(matches!(collections.get("d").await, Err(Error::Forbidden { .. })));
    let err = collections.get("e").await.unwrap_err();
    assert!(matches!(err, Error::ServerError { .. }));
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_error_without_json_body_keeps_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pvlt/1.0/ctl/collections/plain"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.collections().get("plain").await.unwrap_err();
    assert_eq!(err.api_error().unwrap().message, "Internal Server Error");
}

#[tokio::test]
async fn test_listing_without_props_is_unsafe() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pvlt/1.0/data/collections/customers/objects"))
        .and(query_param("reason", "AppFunctionality"))
        .and(query_param("options", "unsafe"))
        .and(query_param("page_size", "1"))
        .and(query_param_is_missing("props"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": Uuid::nil(), "email": "john@somemail.com"}],
            "paging": {"cursor": "1", "size": 1, "remaining_count": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .objects("customers")
        .list(&ListObjectsParams::new().with_page_size(1))
        .await
        .unwrap();
    let paging = page.paging.unwrap();
    assert!(paging.has_more());
    assert_eq!(paging.total(), 3);
}

#[tokio::test]
async fn test_projection_props_are_comma_joined() {
    let (server, client) = setup().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/api/pvlt/1.0/data/collections/customers/objects"))
        .and(query_param("ids", id.to_string()))
        .and(query_param("props", "ssn.mask,email"))
        .and(query_param_is_missing("options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .objects("customers")
        .get(&[id], &["ssn.mask", "email"])
        .await
        .unwrap();
    assert!(page.is_empty());
    assert!(page.paging.is_none());
}

#[tokio::test]
async fn test_tokenize_body_and_count_check() {
    let (server, client) = setup().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(TOKENS))
        .and(query_param("reason", "AppFunctionality"))
        .and(query_param("ttl", "60"))
        .and(body_json(json!([{
            "object": {"id": id},
            "props": ["email"],
            "type": "pointer",
            "tags": ["t1"]
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let request = TokenizeRequest::for_object(id, TokenType::Pointer)
        .with_props(["email"])
        .with_tags(["t1"]);
    let err = client
        .tokens("customers")
        .tokenize_with_ttl(&[request], &Ttl::from_secs(60))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::ResponseMismatch {
            expected: 1,
            actual: 0
        }
    ));
}

#[tokio::test]
async fn test_detokenize_sends_only_selected_mode() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(TOKENS))
        .and(query_param("token_ids", "t1,t2"))
        .and(query_param("options", "include_metadata,archived"))
        .and(query_param_is_missing("object_ids"))
        .and(query_param_is_missing("tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"token_id": "t1", "fields": {"email": "john@somemail.com"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client
        .tokens("customers")
        .detokenize(
            &TokenSelector::token_ids(["t1", "t2"]),
            DetokenizeOptions::default().with_metadata().with_archived(),
        )
        .await
        .unwrap();
    assert_eq!(tokens[0].fields["email"], "john@somemail.com");
}

#[tokio::test]
async fn test_archive_patches_with_zero_ttl() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path(TOKENS))
        .and(query_param("tags", "old"))
        .and(query_param("ttl", "0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .tokens("customers")
        .archive(&TokenSelector::tags(["old"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_selector_is_rejected_before_sending() {
    let (server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = client.tokens("customers");
    let err = tokens
        .delete(&TokenSelector::token_ids(Vec::<String>::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err:?}");

    let err = tokens
        .detokenize(&TokenSelector::object_ids([]), DetokenizeOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err:?}");

    let err = tokens
        .archive(&TokenSelector::tags(Vec::<&str>::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err:?}");
}

#[tokio::test]
async fn test_update_sends_replacement_tags() {
    let (server, client) = setup().await;
    let object = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(TOKENS))
        .and(query_param("object_ids", object.to_string()))
        .and(query_param_is_missing("ttl"))
        .and(body_json(json!({"tags": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .tokens("customers")
        .update(
            &TokenSelector::object_ids([object]),
            &UpdateTokenRequest::new().with_tags(["a", "b"]),
            None,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rotate_puts_ids_in_query() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("{TOKENS}/rotate")))
        .and(query_param("token_ids", "t1,t2"))
        .and(query_param("reason", "AppFunctionality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"t1": "n1", "t2": "n2"})))
        .expect(1)
        .mount(&server)
        .await;

    let rotated = client
        .tokens("customers")
        .rotate(&["t1", "t2"])
        .await
        .unwrap();
    assert_eq!(rotated["t2"], "n2");
}

#[tokio::test]
async fn test_custom_reason_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(TOKENS))
        .and(query_param("reason", "Maintenance"))
        .and(query_param("token_ids", "t1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .tokens("customers")
        .with_reason("Maintenance")
        .delete(&TokenSelector::token_ids(["t1"]))
        .await
        .unwrap();
}
