//! Fixture decoding, validation and passthrough tests for the schema types.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use playmoney_sdk::types::{
    AssetId, Comment, MarketView, Page, PositionView, Transaction, TransactionType, User, Validate,
};

const DECIMAL_KEYS: &[&str] = &["amount", "cost", "quantity", "value", "liquidityProbability"];

fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"));
    serde_json::from_str(&text).unwrap()
}

/// Canonical form for comparing API JSON with re-serialized values: instants
/// in one format, decimals as normalized strings.
fn normalize(value: &mut Value, key: Option<&str>) {
    let is_decimal = key.is_some_and(|k| DECIMAL_KEYS.contains(&k));
    let is_time = key.is_some_and(|k| k.ends_with("At") || k.ends_with("Date"));

    let canonical = match value {
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                normalize(v, Some(k.as_str()));
            }
            None
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                normalize(item, key);
            }
            None
        }
        Value::Number(n) if is_decimal => Some(canonical_decimal(&n.to_string())),
        Value::String(s) if is_decimal => Some(canonical_decimal(s)),
        Value::String(s) if is_time => {
            let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(s).unwrap().into();
            Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        _ => None,
    };

    if let Some(canonical) = canonical {
        *value = Value::String(canonical);
    }
}

fn canonical_decimal(raw: &str) -> String {
    Decimal::from_str(raw).unwrap().normalize().to_string()
}

/// Decode `raw`, validate it, and check that serializing it back yields the
/// same document.
fn assert_passthrough<T>(raw: &Value) -> T
where
    T: DeserializeOwned + Serialize + Validate,
{
    let decoded: T = serde_json::from_value(raw.clone()).unwrap();
    decoded.validate().unwrap();

    let mut expected = raw.clone();
    let mut actual = serde_json::to_value(&decoded).unwrap();
    normalize(&mut expected, None);
    normalize(&mut actual, None);
    assert_eq!(actual, expected);
    decoded
}

#[test]
fn test_market_fixture() {
    let raw = fixture("market.json");
    let market: MarketView = assert_passthrough(&raw["data"]);

    assert_eq!(market.id, "cm5ifmwfo001g24d2r7fzu34u");
    assert_eq!(market.user.username, "jgyou");
    assert_eq!(market.options().len(), 2);
    assert_eq!(
        market.option("cm5ifmwfo001i24d2efgh5678").map(|o| o.liquidity_probability),
        Some(Decimal::new(38, 2))
    );
    assert!(!market.is_resolved());
    assert!(market.winning_option().is_none());
}

#[test]
fn test_market_passthrough_keeps_payload_shape() {
    let raw = fixture("market.json");

    let mut no_options = raw["data"].clone();
    no_options["options"] = json!([]);
    let market: MarketView = assert_passthrough(&no_options);
    assert_eq!(market.options, Some(vec![]));

    let mut without_options = raw["data"].clone();
    without_options.as_object_mut().unwrap().remove("options");
    let market: MarketView = assert_passthrough(&without_options);
    assert!(market.options.is_none());

    let mut older_option = raw["data"].clone();
    older_option["options"][0]
        .as_object_mut()
        .unwrap()
        .remove("probability");
    let market: MarketView = assert_passthrough(&older_option);
    assert!(market.options()[0].probability.is_none());
    assert_eq!(market.options()[1].probability, Some(38));
}

#[test]
fn test_comment_without_reactions_passthrough() {
    let raw = fixture("comments.json");
    let mut comment = raw["data"][0].clone();
    comment.as_object_mut().unwrap().remove("reactions");
    let comment: Comment = assert_passthrough(&comment);
    assert!(comment.reactions().is_empty());
}

#[test]
fn test_user_fixture_with_offset_timestamp() {
    let raw = fixture("user.json");
    let user: User = assert_passthrough(&raw["data"]);

    assert_eq!(user.primary_account_id, "c66cc328ef6c13d1767417889");
    assert_eq!(user.referral_code.as_deref(), Some("J2P2"));
    assert_eq!(
        user.updated_at.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Some("2024-10-01T05:40:44.407Z".to_string())
    );
}

#[test]
fn test_positions_fixture() {
    let raw = fixture("positions.json");
    let page: Page<PositionView> = assert_passthrough(&raw);

    assert_eq!(page.page_info.total, 1);
    assert!(!page.has_next_page());
    let position = &page.data[0];
    assert_eq!(position.quantity, Decimal::new(8125, 2));
    assert_eq!(position.profit(), Decimal::new(37, 1));
    assert_eq!(position.option.as_ref().map(|o| o.name.as_str()), Some("Yes"));
}

#[test]
fn test_transactions_fixture() {
    let raw = fixture("transactions.json");
    let page: Page<Transaction> = assert_passthrough(&raw);

    assert_eq!(page.page_info.next_cursor(), Some("cm5ih2k7q00ae24d2txn00002"));

    let buy = &page.data[0];
    assert_eq!(buy.transaction_type, TransactionType::TradeBuy);
    assert!(buy.transaction_type.is_trade());
    let account = "c66cc328ef6c13d1767417889".parse().unwrap();
    assert_eq!(buy.net_amount_for(&account, &AssetId::Primary), Decimal::from(-50));

    let bonus = &page.data[1];
    assert_eq!(bonus.transaction_type, TransactionType::HouseSignupBonus);
    assert!(bonus.initiator_id.is_none());
    assert_eq!(bonus.net_amount_for(&account, &AssetId::Primary), Decimal::from(1000));
}

#[test]
fn test_comments_fixture() {
    let raw = fixture("comments.json");
    let comments: Vec<Comment> = assert_passthrough(&raw["data"]);

    assert_eq!(comments.len(), 1);
    assert!(!comments[0].is_reply());
    assert_eq!(comments[0].reaction_counts(), vec![(":+1:", 1)]);
}

#[test]
fn test_invalid_fixture_values_are_rejected() {
    let raw = fixture("market.json");

    let mut bad_id = raw["data"].clone();
    bad_id["id"] = json!("not-a-cuid");
    assert!(serde_json::from_value::<MarketView>(bad_id).is_err());

    let mut bad_time = raw["data"].clone();
    bad_time["createdAt"] = json!("yesterday");
    assert!(serde_json::from_value::<MarketView>(bad_time).is_err());

    let mut wrong_creator = raw["data"].clone();
    wrong_creator["createdBy"] = json!("cm9someoneelse0000000001");
    let market: MarketView = serde_json::from_value(wrong_creator).unwrap();
    assert!(market.validate().is_err());

    let mut resolved_without_resolution = raw["data"].clone();
    resolved_without_resolution["resolvedAt"] = json!("2025-02-04T00:00:00Z");
    let market: MarketView = serde_json::from_value(resolved_without_resolution).unwrap();
    assert!(market.validate().is_err());
}

#[test]
fn test_transaction_entry_asset_rule() {
    let mut raw = fixture("transactions.json");
    raw["data"][0]["entries"][0]["assetType"] = json!("MARKET_OPTION");
    let page: Page<Transaction> = serde_json::from_value(raw).unwrap();
    assert!(page.validate().is_err());
}
