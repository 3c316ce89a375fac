//! Positions, ledger transactions and balances.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::base::{AssetId, Cuid, Timestamp};
use super::market::{Market, MarketOption};
use super::user::{Account, User};
use super::validate::{ensure_eq, ensure_not_after, Validate};
use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    MarketOption,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    TradeBuy,
    TradeSell,
    TradeWin,
    TradeLoss,
    CreatorTraderBonus,
    LiquidityInitialize,
    LiquidityDeposit,
    LiquidityWithdrawal,
    LiquidityReturned,
    LiquidityVolumeBonus,
    DailyTradeBonus,
    DailyMarketBonus,
    DailyCommentBonus,
    DailyLiquidityBonus,
    HouseGift,
    HouseSignupBonus,
    ReferrerBonus,
    #[serde(rename = "REFERREE_BONUS", alias = "REFEREE_BONUS")]
    RefereeBonus,
}

impl TransactionType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TradeBuy => "TRADE_BUY",
            Self::TradeSell => "TRADE_SELL",
            Self::TradeWin => "TRADE_WIN",
            Self::TradeLoss => "TRADE_LOSS",
            Self::CreatorTraderBonus => "CREATOR_TRADER_BONUS",
            Self::LiquidityInitialize => "LIQUIDITY_INITIALIZE",
            Self::LiquidityDeposit => "LIQUIDITY_DEPOSIT",
            Self::LiquidityWithdrawal => "LIQUIDITY_WITHDRAWAL",
            Self::LiquidityReturned => "LIQUIDITY_RETURNED",
            Self::LiquidityVolumeBonus => "LIQUIDITY_VOLUME_BONUS",
            Self::DailyTradeBonus => "DAILY_TRADE_BONUS",
            Self::DailyMarketBonus => "DAILY_MARKET_BONUS",
            Self::DailyCommentBonus => "DAILY_COMMENT_BONUS",
            Self::DailyLiquidityBonus => "DAILY_LIQUIDITY_BONUS",
            Self::HouseGift => "HOUSE_GIFT",
            Self::HouseSignupBonus => "HOUSE_SIGNUP_BONUS",
            Self::ReferrerBonus => "REFERRER_BONUS",
            Self::RefereeBonus => "REFERREE_BONUS",
        }
    }

    #[must_use]
    pub fn is_trade(&self) -> bool {
        matches!(
            self,
            Self::TradeBuy | Self::TradeSell | Self::TradeWin | Self::TradeLoss
        )
    }

    #[must_use]
    pub fn is_liquidity(&self) -> bool {
        matches!(
            self,
            Self::LiquidityInitialize
                | Self::LiquidityDeposit
                | Self::LiquidityWithdrawal
                | Self::LiquidityReturned
        )
    }
}

/// Currency moves as `PRIMARY`; option shares move under the option's id.
fn check_asset(asset_type: AssetType, asset_id: &AssetId) -> Result<(), SchemaError> {
    match (asset_type, asset_id) {
        (AssetType::Currency, AssetId::Primary) | (AssetType::MarketOption, AssetId::Option(_)) => {
            Ok(())
        }
        (asset_type, asset_id) => Err(SchemaError::Inconsistent(format!(
            "asset id {asset_id} does not fit asset type {asset_type:?}"
        ))),
    }
}

/// Shares of one option held by one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: Cuid,
    pub account_id: Cuid,
    pub market_id: Cuid,
    pub option_id: Cuid,
    pub cost: Decimal,
    pub quantity: Decimal,
    pub value: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Position {
    /// Unrealized profit: current value minus what was paid.
    #[must_use]
    pub fn profit(&self) -> Decimal {
        self.value - self.cost
    }
}

impl Validate for Position {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.value.is_sign_negative() && !self.value.is_zero() {
            return Err(SchemaError::OutOfRange {
                field: "value",
                value: self.value.to_string(),
                min: "0".to_string(),
                max: "inf".to_string(),
            });
        }
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)
    }
}

/// Position with the account, market and option it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    #[serde(flatten)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<MarketOption>,
}

impl std::ops::Deref for PositionView {
    type Target = Position;

    fn deref(&self) -> &Position {
        &self.position
    }
}

impl Validate for PositionView {
    fn validate(&self) -> Result<(), SchemaError> {
        let position = &self.position;
        position.validate()?;

        if let Some(account) = &self.account {
            account.validate()?;
            ensure_eq("account.id", &position.account_id, &account.id)?;
        }
        if let Some(market) = &self.market {
            market.validate()?;
            ensure_eq("market.id", &position.market_id, &market.id)?;
        }
        if let Some(option) = &self.option {
            option.validate()?;
            ensure_eq("option.id", &position.option_id, &option.id)?;
            ensure_eq("option.marketId", &position.market_id, &option.market_id)?;
        }
        Ok(())
    }
}

/// One leg of a transaction: `amount` of an asset moved between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub id: Cuid,
    pub amount: Decimal,
    pub asset_type: AssetType,
    pub asset_id: AssetId,
    pub from_account_id: Cuid,
    pub to_account_id: Cuid,
    pub transaction_id: Cuid,
    pub created_at: Timestamp,
}

impl Validate for TransactionEntry {
    fn validate(&self) -> Result<(), SchemaError> {
        check_asset(self.asset_type, &self.asset_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Cuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// House-issued transactions (gifts, bonuses) have no initiator.
    pub initiator_id: Option<Cuid>,
    pub is_reverse: Option<bool>,
    pub reverse_of_id: Option<Cuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub batch_id: Option<Cuid>,
    pub market_id: Option<Cuid>,
    pub entries: Vec<TransactionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiator: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
}

impl Transaction {
    /// Net amount of `asset_id` received by `account_id` across all entries.
    #[must_use]
    pub fn net_amount_for(&self, account_id: &Cuid, asset_id: &AssetId) -> Decimal {
        self.entries
            .iter()
            .filter(|e| &e.asset_id == asset_id)
            .fold(Decimal::ZERO, |mut acc, e| {
                if &e.to_account_id == account_id {
                    acc += e.amount;
                }
                if &e.from_account_id == account_id {
                    acc -= e.amount;
                }
                acc
            })
    }
}

impl Validate for Transaction {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)?;

        for entry in &self.entries {
            entry.validate()?;
            ensure_eq("entries[].transactionId", &self.id, &entry.transaction_id)?;
        }

        if self.reverse_of_id.is_some() && self.is_reverse != Some(true) {
            return Err(SchemaError::Inconsistent(format!(
                "transaction {} has reverseOfId but is not marked as a reversal",
                self.id
            )));
        }

        if let Some(initiator) = &self.initiator {
            initiator.validate()?;
            match &self.initiator_id {
                Some(initiator_id) => ensure_eq("initiator.id", initiator_id, &initiator.id)?,
                None => {
                    return Err(SchemaError::Missing {
                        field: "initiatorId",
                        reason: "transaction embeds an initiator",
                    })
                }
            }
        }

        if let Some(market) = &self.market {
            market.validate()?;
            match &self.market_id {
                Some(market_id) => ensure_eq("market.id", market_id, &market.id)?,
                None => {
                    return Err(SchemaError::Missing {
                        field: "marketId",
                        reason: "transaction embeds a market",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Holdings of one asset in one account. `subtotals` breaks the amount down
/// by transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub id: Cuid,
    pub account_id: Cuid,
    pub asset_type: AssetType,
    pub asset_id: AssetId,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotals: Option<BTreeMap<String, Decimal>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Balance {
    /// Part of `amount` contributed by transactions of `kind`, e.g. `"TRADE_BUY"`.
    #[must_use]
    pub fn subtotal(&self, kind: &str) -> Option<Decimal> {
        self.subtotals.as_ref()?.get(kind).copied()
    }
}

impl Validate for Balance {
    fn validate(&self) -> Result<(), SchemaError> {
        check_asset(self.asset_type, &self.asset_id)?;
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)
    }
}

/// Result of `markets/{id}/balance`: the AMM's holdings and, when
/// authenticated, the caller's balances and positions in the market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBalance {
    pub amm: Vec<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<Balance>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_positions: Option<Vec<Position>>,
}

impl Validate for MarketBalance {
    fn validate(&self) -> Result<(), SchemaError> {
        self.amm.validate()?;
        self.user.validate()?;
        self.user_positions.validate()
    }
}

/// One holder's balance in a market, from `markets/{id}/balances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderBalance {
    #[serde(flatten)]
    pub balance: Balance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

impl Validate for HolderBalance {
    fn validate(&self) -> Result<(), SchemaError> {
        self.balance.validate()?;
        if let Some(account) = &self.account {
            account.validate()?;
            ensure_eq("account.id", &self.balance.account_id, &account.id)?;
        }
        Ok(())
    }
}
