use std::ops::Deref;

use rust_decimal::Decimal;

use super::comments::CommentHandle;
use crate::client::PlayMoneyClient;
use crate::error::Result;
use crate::pagination::{ListEndpoint, Paginator};
use crate::types::{
    Activity, CancelMarket, Comment, CommentEntityType, CreateComment, CreateMarket, Cuid,
    HolderBalance, LiquidityRequest, MarketBalance, MarketGraphTick, MarketQuery, MarketView,
    Page, PositionQuery, PositionView, ResolveMarket, TradeRequest, Transaction, UpdateMarket,
};

pub type MarketPaginator = Paginator<ListEndpoint<MarketView, MarketQuery>>;
pub type PositionPaginator = Paginator<ListEndpoint<PositionView, PositionQuery>>;

/// `markets` collection.
#[derive(Debug, Clone, Copy)]
pub struct MarketResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> MarketResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, market_id: &str) -> Result<MarketHandle> {
        let market = self.client.get(&["markets", market_id]).await?;
        Ok(self.attach(market))
    }

    /// One page of markets matching `query`.
    pub async fn list(
        &self,
        query: &MarketQuery,
        cursor: Option<&str>,
    ) -> Result<Page<MarketView>> {
        self.client.get_page(&["markets"], query, cursor).await
    }

    /// Every market matching `query`, page by page.
    #[must_use]
    pub fn paginate(&self, query: MarketQuery) -> MarketPaginator {
        Paginator::new(ListEndpoint::new(self.client.clone(), &["markets"], query))
    }

    pub async fn create(&self, market: &CreateMarket) -> Result<MarketHandle> {
        let market = self.client.post(&["markets"], market).await?;
        Ok(self.attach(market))
    }

    pub async fn update(&self, market_id: &str, changes: &UpdateMarket) -> Result<MarketHandle> {
        let market = self.client.patch(&["markets", market_id], changes).await?;
        Ok(self.attach(market))
    }

    /// Wrap a market obtained elsewhere, e.g. from [`list`](Self::list).
    #[must_use]
    pub fn attach(&self, market: MarketView) -> MarketHandle {
        MarketHandle {
            client: self.client.clone(),
            market,
        }
    }
}

/// A fetched market plus the client to query it further.
#[derive(Debug, Clone)]
pub struct MarketHandle {
    client: PlayMoneyClient,
    market: MarketView,
}

impl Deref for MarketHandle {
    type Target = MarketView;

    fn deref(&self) -> &MarketView {
        &self.market
    }
}

impl MarketHandle {
    #[must_use]
    pub fn into_inner(self) -> MarketView {
        self.market
    }

    /// Re-fetch the market.
    pub async fn refresh(&mut self) -> Result<()> {
        let fresh: MarketView = self.client.get(&["markets", self.market.id.as_str()]).await?;
        self.market = fresh;
        Ok(())
    }

    pub async fn activity(&self) -> Result<Vec<Activity>> {
        self.client
            .get(&["markets", self.market.id.as_str(), "activity"])
            .await
    }

    /// AMM holdings and, when authenticated, the caller's stake.
    pub async fn balance(&self) -> Result<MarketBalance> {
        self.client
            .get(&["markets", self.market.id.as_str(), "balance"])
            .await
    }

    /// Balances of every account holding a position.
    pub async fn balances(&self) -> Result<Vec<HolderBalance>> {
        self.client
            .get(&["markets", self.market.id.as_str(), "balances"])
            .await
    }

    pub async fn comments(&self) -> Result<Vec<Comment>> {
        self.client
            .get(&["markets", self.market.id.as_str(), "comments"])
            .await
    }

    pub async fn graph(&self) -> Result<Vec<MarketGraphTick>> {
        self.client
            .get(&["markets", self.market.id.as_str(), "graph"])
            .await
    }

    pub async fn positions(
        &self,
        query: &PositionQuery,
        cursor: Option<&str>,
    ) -> Result<Page<PositionView>> {
        self.client
            .get_page(&["markets", self.market.id.as_str(), "positions"], query, cursor)
            .await
    }

    #[must_use]
    pub fn paginate_positions(&self, query: PositionQuery) -> PositionPaginator {
        Paginator::new(ListEndpoint::new(
            self.client.clone(),
            &["markets", self.market.id.as_str(), "positions"],
            query,
        ))
    }

    pub async fn related(&self) -> Result<Vec<MarketView>> {
        self.client
            .get(&["markets", self.market.id.as_str(), "related"])
            .await
    }

    pub async fn buy(&self, option_id: &Cuid, amount: Decimal) -> Result<Transaction> {
        self.trade("buy", option_id, amount).await
    }

    pub async fn sell(&self, option_id: &Cuid, amount: Decimal) -> Result<Transaction> {
        self.trade("sell", option_id, amount).await
    }

    pub async fn add_liquidity(&self, amount: Decimal) -> Result<Transaction> {
        self.client
            .post(
                &["markets", self.market.id.as_str(), "liquidity"],
                &LiquidityRequest { amount },
            )
            .await
    }

    /// Apply `changes` and keep the updated market.
    pub async fn update(&mut self, changes: &UpdateMarket) -> Result<()> {
        let fresh: MarketView = self
            .client
            .patch(&["markets", self.market.id.as_str()], changes)
            .await?;
        self.market = fresh;
        Ok(())
    }

    /// Resolve in favour of `option_id` and keep the resolved market.
    pub async fn resolve(
        &mut self,
        option_id: &Cuid,
        supporting_link: Option<String>,
    ) -> Result<()> {
        let body = ResolveMarket {
            option_id: option_id.clone(),
            supporting_link,
        };
        let fresh: MarketView = self
            .client
            .post(&["markets", self.market.id.as_str(), "resolve"], &body)
            .await?;
        self.market = fresh;
        Ok(())
    }

    pub async fn cancel(&mut self, reason: impl Into<String>) -> Result<()> {
        let body = CancelMarket {
            reason: reason.into(),
        };
        let fresh: MarketView = self
            .client
            .post(&["markets", self.market.id.as_str(), "cancel"], &body)
            .await?;
        self.market = fresh;
        Ok(())
    }

    /// Post a top-level comment on this market.
    pub async fn comment(&self, content: impl Into<String>) -> Result<CommentHandle> {
        let body = CreateComment {
            content: content.into(),
            entity_type: CommentEntityType::Market,
            entity_id: self.market.id.clone(),
            parent_id: None,
        };
        self.client.comments().create(&body).await
    }

    async fn trade(&self, side: &str, option_id: &Cuid, amount: Decimal) -> Result<Transaction> {
        let body = TradeRequest {
            option_id: option_id.clone(),
            amount,
        };
        self.client
            .post(&["markets", self.market.id.as_str(), side], &body)
            .await
    }
}
