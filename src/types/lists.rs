//! Curated market lists.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::base::{Cuid, Timestamp};
use super::market::{CreateOption, Market};
use super::user::User;
use super::validate::{ensure_eq, ensure_not_after, Validate};
use crate::error::SchemaError;

/// Who may add markets to a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionPolicy {
    Public,
    #[default]
    Disabled,
    OwnersOnly,
    FriendsOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketList {
    pub id: Cuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub owner_id: Cuid,
    pub contribution_policy: ContributionPolicy,
    pub contribution_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MarketList {
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

impl Validate for MarketList {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)
    }
}

/// Membership row linking a market to a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListItem {
    pub id: Cuid,
    pub list_id: Cuid,
    pub market_id: Cuid,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
}

/// List with its owner and member markets, as returned by `lists/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListView {
    #[serde(flatten)]
    pub list: MarketList,
    pub owner: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<MarketListItem>>,
}

impl Deref for MarketListView {
    type Target = MarketList;

    fn deref(&self) -> &MarketList {
        &self.list
    }
}

impl MarketListView {
    #[must_use]
    pub fn markets(&self) -> &[MarketListItem] {
        self.markets.as_deref().unwrap_or_default()
    }
}

impl Validate for MarketListView {
    fn validate(&self) -> Result<(), SchemaError> {
        self.list.validate()?;
        self.owner.validate()?;
        ensure_eq("owner.id", &self.list.owner_id, &self.owner.id)?;

        for item in self.markets() {
            ensure_eq("markets[].listId", &self.list.id, &item.list_id)?;
            if let Some(market) = &item.market {
                market.validate()?;
                ensure_eq("markets[].market.id", &item.market_id, &market.id)?;
            }
        }
        Ok(())
    }
}

/// Market to create as part of a new list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListMarket {
    pub question: String,
    pub options: Vec<CreateOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateList {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub contribution_policy: ContributionPolicy,
    #[serde(default)]
    pub contribution_review: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub close_date: Timestamp,
    pub markets: Vec<CreateListMarket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_policy: Option<ContributionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_review: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Add existing markets to a list by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddListMarkets {
    pub market_ids: Vec<Cuid>,
}
