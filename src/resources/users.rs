use std::ops::Deref;

use super::markets::PositionPaginator;
use super::transactions::TransactionPaginator;
use crate::client::PlayMoneyClient;
use crate::error::Result;
use crate::pagination::{ListEndpoint, Paginator};
use crate::types::{
    Balance, Page, PositionQuery, PositionView, Transaction, TransactionQuery, UpdateUser, User,
    UserGraphTick, UsernameCheck,
};

/// `users` collection.
#[derive(Debug, Clone, Copy)]
pub struct UserResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> UserResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: &str) -> Result<UserHandle> {
        let user = self.client.get(&["users", user_id]).await?;
        Ok(self.attach(user))
    }

    pub async fn by_username(&self, username: &str) -> Result<UserHandle> {
        let user = self.client.get(&["users", "username", username]).await?;
        Ok(self.attach(user))
    }

    pub async fn by_referral(&self, code: &str) -> Result<UserHandle> {
        let user = self.client.get(&["users", "referral", code]).await?;
        Ok(self.attach(user))
    }

    pub async fn check_username(&self, username: &str) -> Result<UsernameCheck> {
        self.client
            .get(&["users", "check-username", username])
            .await
    }

    /// Owner of the configured API key.
    pub async fn me(&self) -> Result<UserHandle> {
        let user = self.client.get_authed(&["users", "me"]).await?;
        Ok(self.attach(user))
    }

    pub async fn update_me(&self, changes: &UpdateUser) -> Result<UserHandle> {
        let user = self.client.patch(&["users", "me"], changes).await?;
        Ok(self.attach(user))
    }

    #[must_use]
    pub fn attach(&self, user: User) -> UserHandle {
        UserHandle {
            client: self.client.clone(),
            user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserHandle {
    client: PlayMoneyClient,
    user: User,
}

impl Deref for UserHandle {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl UserHandle {
    #[must_use]
    pub fn into_inner(self) -> User {
        self.user
    }

    /// Primary-currency balance of the user's main account.
    pub async fn balance(&self) -> Result<Balance> {
        self.client
            .get(&["users", self.user.id.as_str(), "balance"])
            .await
    }

    pub async fn graph(&self) -> Result<Vec<UserGraphTick>> {
        self.client
            .get(&["users", self.user.id.as_str(), "graph"])
            .await
    }

    pub async fn positions(
        &self,
        query: &PositionQuery,
        cursor: Option<&str>,
    ) -> Result<Page<PositionView>> {
        self.client
            .get_page(&["users", self.user.id.as_str(), "positions"], query, cursor)
            .await
    }

    #[must_use]
    pub fn paginate_positions(&self, query: PositionQuery) -> PositionPaginator {
        Paginator::new(ListEndpoint::new(
            self.client.clone(),
            &["users", self.user.id.as_str(), "positions"],
            query,
        ))
    }

    /// Transactions involving this user; any `user_id` in `query` is replaced.
    pub async fn transactions(
        &self,
        query: TransactionQuery,
        cursor: Option<&str>,
    ) -> Result<Page<Transaction>> {
        self.client
            .transactions()
            .list(&self.scoped(query), cursor)
            .await
    }

    #[must_use]
    pub fn paginate_transactions(&self, query: TransactionQuery) -> TransactionPaginator {
        self.client.transactions().paginate(self.scoped(query))
    }

    fn scoped(&self, query: TransactionQuery) -> TransactionQuery {
        TransactionQuery {
            user_id: Some(self.user.id.clone()),
            ..query
        }
    }
}
