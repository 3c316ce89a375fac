//! Markets, their options (outcomes) and resolutions.

use std::collections::HashSet;
use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::base::{Cuid, HexColor, Timestamp};
use super::user::User;
use super::validate::{ensure_eq, ensure_not_after, ensure_range, Validate};
use crate::constants::WEB_BASE_URL;
use crate::error::SchemaError;

/// Core market record, as embedded in other resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: Cuid,
    pub question: String,
    pub description: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    pub created_at: Timestamp,
    pub close_date: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub canceled_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,

    pub created_by: Cuid,
    pub amm_account_id: Cuid,
    pub clearing_account_id: Cuid,
    pub canceled_by_id: Option<Cuid>,

    pub comment_count: u32,
    pub unique_traders_count: u32,
    pub unique_promoters_count: u32,
    pub liquidity_count: Option<u64>,
    pub parent_list_id: Option<Cuid>,
}

impl Market {
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Public web page for this market.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{WEB_BASE_URL}/questions/{}/{}", self.id, self.slug)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }

    /// Open for trading at `now`: not resolved, not canceled, not past its close date.
    #[must_use]
    pub fn is_open_at(&self, now: Timestamp) -> bool {
        !self.is_resolved() && !self.is_canceled() && now < self.close_date
    }
}

impl Validate for Market {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("createdAt", &self.created_at, "closeDate", &self.close_date)
    }
}

/// Option id with its current probability, as found in graph ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteOption {
    pub id: Cuid,
    /// Percentage, 0..=100. Older payloads omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
}

impl Validate for LiteOption {
    fn validate(&self) -> Result<(), SchemaError> {
        check_probability(self.probability)
    }
}

/// One possible outcome of a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOption {
    pub id: Cuid,
    pub name: String,
    pub market_id: Cuid,
    pub color: HexColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    pub liquidity_probability: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Validate for MarketOption {
    fn validate(&self) -> Result<(), SchemaError> {
        check_probability(self.probability)?;
        ensure_range(
            "liquidityProbability",
            &self.liquidity_probability,
            &Decimal::ZERO,
            &Decimal::ONE,
        )?;
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)
    }
}

fn check_probability(probability: Option<u8>) -> Result<(), SchemaError> {
    match probability {
        Some(p) => ensure_range("probability", &p, &0, &100),
        None => Ok(()),
    }
}

/// How, when and by whom a market was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketResolution {
    pub id: Cuid,
    pub market_id: Cuid,
    pub resolved_by_id: Cuid,
    /// Id of the winning option.
    pub resolution_id: Cuid,
    /// Free text; the web app does not enforce a URL here.
    pub supporting_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolution: MarketOption,
    pub resolved_by: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
}

impl Validate for MarketResolution {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)?;
        self.resolution.validate()?;
        self.resolved_by.validate()?;
        ensure_eq("resolution.id", &self.resolution_id, &self.resolution.id)?;
        ensure_eq("resolution.marketId", &self.market_id, &self.resolution.market_id)?;
        ensure_eq("resolvedBy.id", &self.resolved_by_id, &self.resolved_by.id)?;
        if let Some(market) = &self.market {
            market.validate()?;
            ensure_eq("market.id", &self.market_id, &market.id)?;
        }
        Ok(())
    }
}

/// Minimal view of the list a market was created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: Cuid,
    pub title: String,
    pub slug: String,
}

/// Market with its creator, options and resolution, as returned by
/// `markets/{id}` and the market listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    #[serde(flatten)]
    pub market: Market,
    pub user: User,
    /// Absent on some listing endpoints; `Some(vec![])` when the API sent
    /// an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<MarketOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_resolution: Option<MarketResolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_list: Option<ListSummary>,
    /// Only set on `markets/{id}/related`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_tags_count: Option<u32>,
}

impl Deref for MarketView {
    type Target = Market;

    fn deref(&self) -> &Market {
        &self.market
    }
}

impl MarketView {
    #[must_use]
    pub fn options(&self) -> &[MarketOption] {
        self.options.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&MarketOption> {
        self.options().iter().find(|o| o.id == option_id)
    }

    /// Winning option, once the market is resolved.
    #[must_use]
    pub fn winning_option(&self) -> Option<&MarketOption> {
        self.market_resolution.as_ref().map(|r| &r.resolution)
    }
}

impl Validate for MarketView {
    fn validate(&self) -> Result<(), SchemaError> {
        self.market.validate()?;
        self.user.validate()?;
        ensure_eq("user.id", &self.market.created_by, &self.user.id)?;

        let mut seen = HashSet::new();
        for option in self.options() {
            option.validate()?;
            ensure_eq("options[].marketId", &self.market.id, &option.market_id)?;
            if !seen.insert(&option.id) {
                return Err(SchemaError::Inconsistent(format!(
                    "option {} appears twice in market {}",
                    option.id, self.market.id
                )));
            }
        }

        if let Some(parent) = &self.parent_list {
            if let Some(parent_list_id) = &self.market.parent_list_id {
                ensure_eq("parentList.id", parent_list_id, &parent.id)?;
            }
        }

        match &self.market_resolution {
            None if self.market.resolved_at.is_some() => Err(SchemaError::Missing {
                field: "marketResolution",
                reason: "market is resolved but carries no resolution",
            }),
            None => Ok(()),
            Some(resolution) => {
                resolution.validate()?;
                ensure_eq("marketResolution.marketId", &self.market.id, &resolution.market_id)?;
                if !seen.is_empty() && !seen.contains(&resolution.resolution_id) {
                    return Err(SchemaError::Inconsistent(format!(
                        "resolution option {} is not an option of market {}",
                        resolution.resolution_id, self.market.id
                    )));
                }
                if let Some(resolved_by) = &self.resolved_by {
                    ensure_eq("resolvedBy.id", &resolution.resolved_by_id, &resolved_by.id)?;
                }
                Ok(())
            }
        }
    }
}

/// New option for [`CreateMarket`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOption {
    pub name: String,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarket {
    pub question: String,
    pub description: String,
    pub close_date: Timestamp,
    pub options: Vec<CreateOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMarket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Buy or sell `amount` of an option. Amounts go out as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub option_id: Cuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveMarket {
    pub option_id: Cuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelMarket {
    pub reason: String,
}
