//! Time-bucketed series behind the market and user charts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::base::Timestamp;
use super::market::LiteOption;
use super::validate::{ensure_not_after, Validate};
use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketGraphTick {
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub options: Vec<LiteOption>,
}

impl Validate for MarketGraphTick {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("startAt", &self.start_at, "endAt", &self.end_at)?;
        self.options.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGraphTick {
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub balance: Decimal,
    pub liquidity: Decimal,
    pub markets: Decimal,
}

impl UserGraphTick {
    /// Cash plus liquidity plus market holdings at the end of the bucket.
    #[must_use]
    pub fn net_worth(&self) -> Decimal {
        self.balance + self.liquidity + self.markets
    }
}

impl Validate for UserGraphTick {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("startAt", &self.start_at, "endAt", &self.end_at)
    }
}
