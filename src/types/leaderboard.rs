use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::base::Cuid;
use super::validate::Validate;
use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: Cuid,
    pub display_name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub total: Decimal,
    pub rank: u32,
}

/// The caller's own position on each board; only present when authenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRanking {
    pub trader: LeaderboardEntry,
    pub creator: LeaderboardEntry,
    pub promoter: LeaderboardEntry,
    pub quester: LeaderboardEntry,
    pub referrer: LeaderboardEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub top_traders: Vec<LeaderboardEntry>,
    pub top_creators: Vec<LeaderboardEntry>,
    pub top_promoters: Vec<LeaderboardEntry>,
    pub top_questers: Vec<LeaderboardEntry>,
    pub top_referrers: Vec<LeaderboardEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rankings: Option<UserRanking>,
}

fn check_ranked(board: &'static str, entries: &[LeaderboardEntry]) -> Result<(), SchemaError> {
    for pair in entries.windows(2) {
        if pair[0].rank > pair[1].rank {
            return Err(SchemaError::Inconsistent(format!(
                "{board} is not ordered by rank: {} before {}",
                pair[0].rank, pair[1].rank
            )));
        }
    }
    Ok(())
}

impl Validate for Leaderboard {
    fn validate(&self) -> Result<(), SchemaError> {
        check_ranked("topTraders", &self.top_traders)?;
        check_ranked("topCreators", &self.top_creators)?;
        check_ranked("topPromoters", &self.top_promoters)?;
        check_ranked("topQuesters", &self.top_questers)?;
        check_ranked("topReferrers", &self.top_referrers)
    }
}
