use crate::client::PlayMoneyClient;
use crate::error::{PlayMoneyError, Result};
use crate::types::{Leaderboard, LeaderboardQuery};

#[derive(Debug, Clone, Copy)]
pub struct LeaderboardResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> LeaderboardResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    /// Boards for the current month, or for `year`/`month` when given.
    pub async fn get(&self, query: &LeaderboardQuery) -> Result<Leaderboard> {
        if let Some(month) = query.month {
            if !(1..=12).contains(&month) {
                return Err(PlayMoneyError::invalid_argument(format!(
                    "month must be 1-12, got {month}"
                )));
            }
            if query.year.is_none() {
                return Err(PlayMoneyError::invalid_argument(
                    "month filter needs a year",
                ));
            }
        }
        self.client.get_with(&["leaderboard"], query).await
    }
}
