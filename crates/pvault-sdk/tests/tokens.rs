//! Token operations against the fake vault.

mod common;

use common::{eric, john, mary, object, Fixture, CUSTOMERS};
use pvault_sdk::results::fields_match;
use pvault_sdk::{
    DetokenizeOptions, DetokenizeResult, Error, QueryToken, RotateResult, SearchResult,
    TokenSelector, TokenType, TokenizeRequest, TokenizeResult, Ttl, UpdateTokenRequest,
};
use serde_json::json;
use uuid::Uuid;

/// Adds john, mary and eric and tokenizes their emails, tagging each token
/// with the owner's name.
async fn tokenized_customers(fixture: &Fixture, token_type: TokenType) -> TokenizeResult {
    let mut ids = Vec::new();
    for customer in [john(), mary(), eric()] {
        ids.push(fixture.add(customer).await.id);
    }

    let requests: Vec<TokenizeRequest> = ids
        .iter()
        .zip(["john", "mary", "eric"])
        .map(|(id, tag)| {
            TokenizeRequest::for_object(*id, token_type)
                .with_props(["email"])
                .with_tags([tag])
        })
        .collect();

    let tokens = fixture
        .client
        .tokens(CUSTOMERS)
        .tokenize(&requests)
        .await
        .unwrap();
    TokenizeResult::new(ids, tokens).unwrap()
}

async fn detokenize(fixture: &Fixture, selector: TokenSelector) -> DetokenizeResult {
    DetokenizeResult::new(
        fixture
            .client
            .tokens(CUSTOMERS)
            .detokenize(&selector, DetokenizeOptions::default())
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn test_tokens_come_back_in_request_order() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        assert_eq!(tokenized.len(), 3, "{token_type}");

        let detokenized = detokenize(
            &fixture,
            TokenSelector::token_ids(tokenized.token_ids()),
        )
        .await;

        for ((_, token_id), expected) in tokenized.pairs().zip([john(), mary(), eric()]) {
            let fields = detokenized.fields(token_id).unwrap();
            assert!(
                fields_match(&object(expected), fields, &["email"]),
                "{token_type} {token_id}: {fields:?}"
            );
        }
    }
}

#[tokio::test]
async fn test_search_indexes_tokens_by_object() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;

        let found = SearchResult::new(
            fixture
                .client
                .tokens(CUSTOMERS)
                .search(&QueryToken::from(TokenSelector::tags(["mary", "eric"])))
                .await
                .unwrap(),
        );

        assert_eq!(found.len(), 2, "{token_type}");
        for object_id in &tokenized.object_ids()[1..] {
            assert_eq!(found.token_id(object_id), tokenized.token_id(object_id), "{token_type}");
        }
        assert!(found.token_id(&tokenized.object_ids()[0]).is_none());
    }
}

#[tokio::test]
async fn test_rotation_invalidates_old_ids() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let tokens = fixture.client.tokens(CUSTOMERS);
        let before = detokenize(&fixture, TokenSelector::token_ids(tokenized.token_ids())).await;

        let rotated = RotateResult::new(tokens.rotate(&tokenized.token_ids()).await.unwrap());
        assert_eq!(rotated.len(), 3, "{token_type}");
        let rotated_result = rotated.rotate(&tokenized).unwrap();
        let after = detokenize(&fixture, TokenSelector::token_ids(rotated.new_token_ids())).await;

        for ((object_id, old_token), expected) in tokenized.pairs().zip([john(), mary(), eric()]) {
            let new_token = rotated_result.token_id(&object_id).unwrap();
            assert_ne!(old_token, new_token);
            assert_eq!(rotated.new_token_id(old_token), Some(new_token));
            assert_eq!(before.fields(old_token), after.fields(new_token));
            assert!(
                fields_match(&object(expected), after.fields(new_token).unwrap(), &["email"]),
                "{token_type} {new_token}"
            );

            let err = tokens
                .detokenize(
                    &TokenSelector::token_ids([old_token]),
                    DetokenizeOptions::default(),
                )
                .await
                .unwrap_err();
            assert!(err.is_not_found(), "{token_type}: {err:?}");
        }
    }
}

#[tokio::test]
async fn test_rotation_of_unknown_token_is_not_found() {
    let fixture = Fixture::with_customers().await;

    let err = fixture
        .client
        .tokens(CUSTOMERS)
        .rotate(&["no-such-token"])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_archived_tokens_are_excluded() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let tokens = fixture.client.tokens(CUSTOMERS);
        let john_token = tokenized.token_values()[0].token_id.clone();

        tokens
            .archive(&TokenSelector::token_ids([john_token.as_str()]))
            .await
            .unwrap();

        let live = detokenize(&fixture, TokenSelector::token_ids(tokenized.token_ids())).await;
        assert_eq!(live.len(), 2, "{token_type}");
        assert!(!live.token_ids().contains(john_token.as_str()));

        let remaining = tokens.search(&QueryToken::default()).await.unwrap();
        assert_eq!(remaining.len(), 2, "{token_type}");
    }
}

#[tokio::test]
async fn test_archived_token_with_archived_option_is_bad_request() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let tokens = fixture.client.tokens(CUSTOMERS);
        let john_id = tokenized.object_ids()[0];
        let by_token = TokenSelector::token_ids([tokenized.token_values()[0].token_id.as_str()]);

        tokens.archive(&by_token).await.unwrap();

        for selector in [
            by_token.clone(),
            TokenSelector::tags(["john", "mary"]),
            TokenSelector::object_ids([john_id]),
        ] {
            let err = tokens
                .detokenize(&selector, DetokenizeOptions::default().with_archived())
                .await
                .unwrap_err();
            assert!(
                matches!(err, Error::BadRequest { .. }),
                "{token_type} {selector:?}: {err:?}"
            );
        }

        let live = detokenize(&fixture, TokenSelector::tags(["john", "mary"])).await;
        assert_eq!(live.len(), 1, "{token_type}");
    }
}

#[tokio::test]
async fn test_archived_object_tokens_need_archived_option() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let john_id = tokenized.object_ids()[0];
        let tokens = fixture.client.tokens(CUSTOMERS);

        fixture
            .client
            .objects(CUSTOMERS)
            .delete_by_id(john_id)
            .await
            .unwrap();

        let selector = TokenSelector::object_ids([john_id]);
        assert!(detokenize(&fixture, selector.clone()).await.is_empty(), "{token_type}");

        let archived = DetokenizeResult::new(
            tokens
                .detokenize(
                    &selector,
                    DetokenizeOptions::default().with_archived().with_metadata(),
                )
                .await
                .unwrap(),
        );
        assert_eq!(archived.len(), 1, "{token_type}");
        let token_id = tokenized.token_id(&john_id).unwrap();
        assert!(fields_match(
            &object(john()),
            archived.fields(token_id).unwrap(),
            &["email"]
        ));
        assert_eq!(archived.metadata(token_id).unwrap().object_ids(), vec![john_id]);
    }
}

#[tokio::test]
async fn test_update_replaces_tags() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let tokens = fixture.client.tokens(CUSTOMERS);

        tokens
            .update(
                &TokenSelector::tags(["john"]),
                &UpdateTokenRequest::new().with_tags(["vip"]),
                None,
            )
            .await
            .unwrap();

        let found = tokens
            .search(&QueryToken::from(TokenSelector::tags(["vip"])))
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "{token_type}");
        assert_eq!(found[0].token_id, tokenized.token_values()[0].token_id);
        assert_eq!(found[0].tags, vec!["vip"]);
    }
}

#[tokio::test]
async fn test_delete_by_object() {
    for token_type in TokenType::ALL {
        let fixture = Fixture::with_customers().await;
        let tokenized = tokenized_customers(&fixture, token_type).await;
        let tokens = fixture.client.tokens(CUSTOMERS);
        let mary_id = tokenized.object_ids()[1];

        tokens
            .delete(&TokenSelector::object_ids([mary_id]))
            .await
            .unwrap();

        let left = SearchResult::new(tokens.search(&QueryToken::default()).await.unwrap());
        assert_eq!(left.len(), 2, "{token_type}");
        assert!(left.token_ids_of(&mary_id).is_empty());
    }
}

#[tokio::test]
async fn test_out_of_range_ttl_is_bad_request() {
    let fixture = Fixture::with_customers().await;
    let id = fixture.add(john()).await.id;
    let tokens = fixture.client.tokens(CUSTOMERS);
    let request = TokenizeRequest::for_object(id, TokenType::Pointer).with_props(["email"]);

    let err = tokens
        .tokenize_with_ttl(&[request.clone()], &Ttl::from_secs(i64::MAX as u64))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest { .. }), "{err:?}");

    let issued = tokens
        .tokenize_with_ttl(&[request], &Ttl::from_secs(3600))
        .await
        .unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(tokens.search(&QueryToken::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_inline_values_and_deterministic_tokens() {
    let fixture = Fixture::with_customers().await;
    let tokens = fixture.client.tokens(CUSTOMERS);

    let inline = |email: &str| {
        TokenizeRequest::for_fields(object(json!({"email": email})), TokenType::Deterministic)
            .with_props(["email"])
    };
    let issued = tokens
        .tokenize(&[
            inline("a@somemail.com"),
            inline("a@somemail.com"),
            inline("b@somemail.com"),
        ])
        .await
        .unwrap();

    assert_eq!(issued[0], issued[1]);
    assert_ne!(issued[0], issued[2]);

    let resolved = detokenize(&fixture, TokenSelector::token_ids([issued[2].token_id.as_str()])).await;
    assert_eq!(resolved.fields(&issued[2].token_id).unwrap()["email"], "b@somemail.com");
}

#[tokio::test]
async fn test_tokenizing_unknown_object_is_not_found() {
    let fixture = Fixture::with_customers().await;

    let err = fixture
        .client
        .tokens(CUSTOMERS)
        .tokenize(&[TokenizeRequest::for_object(Uuid::new_v4(), TokenType::Pointer).with_props(["email"])])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
