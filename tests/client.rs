//! HTTP behaviour of the client against a mock API.

use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use playmoney_sdk::types::{
    CommentEntityType, CreateComment, MarketQuery, MarketStatus, PositionQuery, SortDirection,
    TransactionQuery, TransactionType,
};
use playmoney_sdk::{ClientConfig, PlayMoneyClient, PlayMoneyErrorCode};

const MARKET_ID: &str = "cm5ifmwfo001g24d2r7fzu34u";
const USER_ID: &str = "clzrooq660000a2uznm33y25b";
const API_KEY: &str = "pm_test_0123456789";

fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn anonymous(server: &MockServer) -> PlayMoneyClient {
    PlayMoneyClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap()
}

fn authenticated(server: &MockServer) -> PlayMoneyClient {
    PlayMoneyClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_api_key(API_KEY),
    )
    .unwrap()
}

/// Same market as the fixture under a different id.
fn other_market(id: &str) -> Value {
    let mut market = fixture("market.json")["data"].clone();
    market["id"] = json!(id);
    for option in market["options"].as_array_mut().unwrap() {
        option["marketId"] = json!(id);
    }
    market
}

#[tokio::test]
async fn test_get_market() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}")))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("market.json")))
        .expect(1)
        .mount(&server)
        .await;

    let market = anonymous(&server).markets().get(MARKET_ID).await.unwrap();
    assert_eq!(market.question, "Playmoney API python wrapper in January 2025?");
    assert_eq!(market.options().len(), 2);
    assert_eq!(
        market.url(),
        format!(
            "https://playmoney.dev/questions/{MARKET_ID}/playmoney-api-python-wrapper-in-january-2025"
        )
    );
}

#[tokio::test]
async fn test_user_agent_and_api_key_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{USER_ID}")))
        .and(header("x-api-key", API_KEY))
        .and(header(
            "user-agent",
            format!("playmoney-sdk-rs/{}", playmoney_sdk::SDK_VERSION).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("user.json")))
        .expect(1)
        .mount(&server)
        .await;

    let user = authenticated(&server).users().get(USER_ID).await.unwrap();
    assert_eq!(user.username, "jgyou");
}

#[tokio::test]
async fn test_user_by_username_and_referral() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/username/jgyou"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("user.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/users/referral/J2P2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("user.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/users/check-username/jgyou"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "available": false, "message": "This username is already taken" }
        })))
        .mount(&server)
        .await;

    let client = anonymous(&server);
    let by_name = client.users().by_username("jgyou").await.unwrap();
    let by_code = client.users().by_referral("J2P2").await.unwrap();
    assert_eq!(by_name.id, by_code.id);

    let check = client.users().check_username("jgyou").await.unwrap();
    assert!(!check.available);
}

#[tokio::test]
async fn test_not_found_maps_to_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Market not found" })),
        )
        .mount(&server)
        .await;

    let err = anonymous(&server).markets().get(MARKET_ID).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status, Some(404));
    assert!(err.message.contains("Market not found"));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database unavailable" })),
        )
        .mount(&server)
        .await;

    let err = anonymous(&server)
        .transactions()
        .list(&TransactionQuery::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::ApiError);
    assert_eq!(err.status, Some(500));
    assert!(err.to_string().contains("database unavailable"));
}

#[tokio::test]
async fn test_rejected_key_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&server)
        .await;

    let err = authenticated(&server).users().me().await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::AuthError);
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn test_mutations_without_key_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = anonymous(&server);

    let err = client.users().me().await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::AuthError);

    let body = CreateComment {
        content: "hello".to_string(),
        entity_type: CommentEntityType::Market,
        entity_id: MARKET_ID.parse().unwrap(),
        parent_id: None,
    };
    let err = client.comments().create(&body).await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::AuthError);

    let err = client.lists().delete("cm5list0000a2uzlist00001").await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::AuthError);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = anonymous(&server).users().get(USER_ID).await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::ParseError);
}

#[tokio::test]
async fn test_inconsistent_payload_is_validation_error() {
    let server = MockServer::start().await;
    let mut payload = fixture("market.json");
    payload["data"]["options"][0]["marketId"] = json!("cm9otherotherother0000001");
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let err = anonymous(&server).markets().get(MARKET_ID).await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::ValidationError);
}

#[tokio::test]
async fn test_market_list_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/markets"))
        .and(query_param("status", "active"))
        .and(query_param("tags", "api,python"))
        .and(query_param("sortDirection", "asc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [fixture("market.json")["data"]],
            "pageInfo": { "hasNextPage": false, "endCursor": null, "total": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = MarketQuery {
        status: Some(MarketStatus::Active),
        tags: vec!["api".to_string(), "python".to_string()],
        sort_direction: Some(SortDirection::Asc),
        limit: Some(10),
        ..Default::default()
    };
    let page = anonymous(&server).markets().list(&query, None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_paginator_follows_cursor() {
    let server = MockServer::start().await;
    let second = "cm5second000a2uzmarket0002";
    Mock::given(method("GET"))
        .and(path("/v1/markets"))
        .and(query_param("cursor", MARKET_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [other_market(second)],
            "pageInfo": { "hasNextPage": false, "endCursor": second, "total": 2 }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [fixture("market.json")["data"]],
            "pageInfo": { "hasNextPage": true, "endCursor": MARKET_ID, "total": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous(&server);
    let markets = client
        .markets()
        .paginate(MarketQuery::default())
        .collect_all()
        .await
        .unwrap();
    let ids: Vec<&str> = markets.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![MARKET_ID, second]);
}

#[tokio::test]
async fn test_paginator_respects_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .and(query_param("userId", USER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("transactions.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous(&server);
    let user = client.users().attach(
        serde_json::from_value(fixture("user.json")["data"].clone()).unwrap(),
    );
    let transactions: Vec<_> = user
        .paginate_transactions(TransactionQuery::default())
        .max_pages(1)
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(transactions.len(), 2);
}

#[tokio::test]
async fn test_transaction_type_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .and(query_param("marketId", MARKET_ID))
        .and(query_param("transactionType", "TRADE_BUY,TRADE_SELL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("transactions.json")))
        .expect(1)
        .mount(&server)
        .await;

    let query = TransactionQuery {
        market_id: Some(MARKET_ID.parse().unwrap()),
        transaction_type: vec![TransactionType::TradeBuy.into(), TransactionType::TradeSell.into()],
        ..Default::default()
    };
    let page = assert_ok!(anonymous(&server).transactions().list(&query, None).await);
    assert_eq!(page.page_info.total, 7);
}

#[tokio::test]
async fn test_market_handle_follow_ups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("market.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("comments.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}/positions")))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("positions.json")))
        .mount(&server)
        .await;

    let client = anonymous(&server);
    let market = client.markets().get(MARKET_ID).await.unwrap();

    let comments = market.comments().await.unwrap();
    assert_eq!(comments[0].author.username, "jgyou");

    let query = PositionQuery {
        status: Some(playmoney_sdk::types::PositionStatus::Active),
        ..Default::default()
    };
    let positions = market.positions(&query, None).await.unwrap();
    assert_eq!(positions.data[0].market_id, market.id);
}

#[tokio::test]
async fn test_buy_posts_trade() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/markets/{MARKET_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("market.json")))
        .mount(&server)
        .await;
    let transaction = fixture("transactions.json")["data"][0].clone();
    Mock::given(method("POST"))
        .and(path(format!("/v1/markets/{MARKET_ID}/buy")))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({ "optionId": "cm5ifmwfo001h24d2abcd1234", "amount": 50.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": transaction })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated(&server);
    let market = client.markets().get(MARKET_ID).await.unwrap();
    let yes = market.options()[0].id.clone();
    let transaction = market.buy(&yes, Decimal::from(50)).await.unwrap();
    assert_eq!(transaction.transaction_type, TransactionType::TradeBuy);
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/comments/cm5ik0c1m00b124d2cmt00001"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated(&server);
    assert_ok!(client.comments().delete("cm5ik0c1m00b124d2cmt00001").await);
}

#[tokio::test]
async fn test_react_rejects_bad_emoji_before_sending() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = authenticated(&server);
    let err = assert_err!(
        client
            .comments()
            .react("cm5ik0c1m00b124d2cmt00001", "thumbsup")
            .await
    );
    assert_eq!(err.code, PlayMoneyErrorCode::InvalidArgument);
    assert!(err.message.contains("thumbsup"));
}

#[tokio::test]
async fn test_leaderboard_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/leaderboard"))
        .and(query_param("year", "2025"))
        .and(query_param("month", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "topTraders": [{
                    "userId": USER_ID,
                    "displayName": "jgyou",
                    "username": "jgyou",
                    "avatarUrl": null,
                    "total": "1523.5",
                    "rank": 1
                }],
                "topCreators": [],
                "topPromoters": [],
                "topQuesters": [],
                "topReferrers": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = playmoney_sdk::types::LeaderboardQuery {
        year: Some(2025),
        month: Some(1),
    };
    let board = anonymous(&server).leaderboard().get(&query).await.unwrap();
    assert_eq!(board.top_traders[0].total, Decimal::new(15235, 1));

    let bad = playmoney_sdk::types::LeaderboardQuery {
        year: Some(2025),
        month: Some(13),
    };
    let err = anonymous(&server).leaderboard().get(&bad).await.unwrap_err();
    assert_eq!(err.code, PlayMoneyErrorCode::InvalidArgument);
}
