use serde::{Deserialize, Serialize};

use super::base::Timestamp;
use super::comments::Comment;
use super::finance::Transaction;
use super::market::{MarketOption, MarketResolution, MarketView};
use super::validate::Validate;
use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Comment,
    TradeTransaction,
    LiquidityTransaction,
    MarketCreated,
    MarketResolved,
}

/// One item of a market's activity feed. Which payload is set depends on
/// `activity_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub timestamp_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<MarketOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_resolution: Option<MarketResolution>,
}

impl Validate for Activity {
    fn validate(&self) -> Result<(), SchemaError> {
        let payload_present = match self.activity_type {
            ActivityType::Comment => self.comment.is_some(),
            ActivityType::TradeTransaction | ActivityType::LiquidityTransaction => self
                .transactions
                .as_ref()
                .is_some_and(|txs| !txs.is_empty()),
            ActivityType::MarketCreated => self.market.is_some(),
            ActivityType::MarketResolved => self.market_resolution.is_some(),
        };
        if !payload_present {
            return Err(SchemaError::Inconsistent(format!(
                "{:?} activity at {} is missing its payload",
                self.activity_type, self.timestamp_at
            )));
        }

        self.comment.validate()?;
        self.transactions.validate()?;
        self.option.validate()?;
        self.market.validate()?;
        self.market_resolution.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trade_activity_requires_transactions() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "TRADE_TRANSACTION",
            "timestampAt": "2025-01-10T12:00:00.000Z",
            "transactions": []
        }))
        .unwrap();
        assert!(matches!(activity.validate(), Err(SchemaError::Inconsistent(_))));
    }

    #[test]
    fn test_resolved_activity_requires_resolution() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "MARKET_RESOLVED",
            "timestampAt": "2025-02-03T23:50:54.104Z"
        }))
        .unwrap();
        assert!(activity.validate().is_err());
    }

    #[test]
    fn test_comment_and_creation_activities_require_payload() {
        for kind in ["COMMENT", "MARKET_CREATED"] {
            let activity: Activity = serde_json::from_value(json!({
                "type": kind,
                "timestampAt": "2025-01-04T17:02:55.669Z"
            }))
            .unwrap();
            assert!(
                matches!(activity.validate(), Err(SchemaError::Inconsistent(_))),
                "{kind} without payload should fail"
            );
        }
    }

    #[test]
    fn test_unknown_activity_type_rejected() {
        let result = serde_json::from_value::<Activity>(json!({
            "type": "MARKET_EDITED",
            "timestampAt": "2025-01-10T12:00:00.000Z"
        }));
        assert!(result.is_err());
    }
}
