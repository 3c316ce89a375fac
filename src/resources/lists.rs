use std::ops::Deref;

use super::comments::CommentHandle;
use crate::client::PlayMoneyClient;
use crate::error::{PlayMoneyError, Result};
use crate::pagination::{ListEndpoint, Paginator};
use crate::types::{
    AddListMarkets, Comment, CommentEntityType, CreateComment, CreateList, Cuid, ListQuery,
    MarketListView, Page, UpdateList,
};

pub type ListPaginator = Paginator<ListEndpoint<MarketListView, ListQuery>>;

/// `lists` collection: curated groups of markets.
#[derive(Debug, Clone, Copy)]
pub struct ListResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> ListResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &ListQuery,
        cursor: Option<&str>,
    ) -> Result<Page<MarketListView>> {
        self.client.get_page(&["lists"], query, cursor).await
    }

    #[must_use]
    pub fn paginate(&self, query: ListQuery) -> ListPaginator {
        Paginator::new(ListEndpoint::new(self.client.clone(), &["lists"], query))
    }

    pub async fn get(&self, list_id: &str) -> Result<ListHandle> {
        let list = self.client.get(&["lists", list_id]).await?;
        Ok(self.attach(list))
    }

    pub async fn create(&self, list: &CreateList) -> Result<ListHandle> {
        if list.markets.is_empty() {
            return Err(PlayMoneyError::invalid_argument(
                "a list needs at least one market",
            ));
        }
        let list = self.client.post(&["lists"], list).await?;
        Ok(self.attach(list))
    }

    pub async fn update(&self, list_id: &str, changes: &UpdateList) -> Result<ListHandle> {
        let list = self.client.patch(&["lists", list_id], changes).await?;
        Ok(self.attach(list))
    }

    pub async fn delete(&self, list_id: &str) -> Result<()> {
        self.client.delete(&["lists", list_id]).await
    }

    /// Add existing markets to a list; returns the list with its new members.
    pub async fn add_markets(&self, list_id: &str, market_ids: &[Cuid]) -> Result<ListHandle> {
        if market_ids.is_empty() {
            return Err(PlayMoneyError::invalid_argument("no market ids given"));
        }
        let body = AddListMarkets {
            market_ids: market_ids.to_vec(),
        };
        let list = self
            .client
            .post(&["lists", list_id, "markets"], &body)
            .await?;
        Ok(self.attach(list))
    }

    pub async fn comments(&self, list_id: &str) -> Result<Vec<Comment>> {
        self.client.get(&["lists", list_id, "comments"]).await
    }

    #[must_use]
    pub fn attach(&self, list: MarketListView) -> ListHandle {
        ListHandle {
            client: self.client.clone(),
            list,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListHandle {
    client: PlayMoneyClient,
    list: MarketListView,
}

impl Deref for ListHandle {
    type Target = MarketListView;

    fn deref(&self) -> &MarketListView {
        &self.list
    }
}

impl ListHandle {
    #[must_use]
    pub fn into_inner(self) -> MarketListView {
        self.list
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let fresh = self.client.lists().get(self.list.id.as_str()).await?;
        self.list = fresh.into_inner();
        Ok(())
    }

    pub async fn comments(&self) -> Result<Vec<Comment>> {
        self.client.lists().comments(self.list.id.as_str()).await
    }

    pub async fn update(&mut self, changes: &UpdateList) -> Result<()> {
        let fresh = self
            .client
            .lists()
            .update(self.list.id.as_str(), changes)
            .await?;
        self.list = fresh.into_inner();
        Ok(())
    }

    pub async fn add_markets(&mut self, market_ids: &[Cuid]) -> Result<()> {
        let fresh = self
            .client
            .lists()
            .add_markets(self.list.id.as_str(), market_ids)
            .await?;
        self.list = fresh.into_inner();
        Ok(())
    }

    pub async fn delete(self) -> Result<()> {
        self.client.lists().delete(self.list.id.as_str()).await
    }

    pub async fn comment(&self, content: impl Into<String>) -> Result<CommentHandle> {
        let body = CreateComment {
            content: content.into(),
            entity_type: CommentEntityType::List,
            entity_id: self.list.id.clone(),
            parent_id: None,
        };
        self.client.comments().create(&body).await
    }
}
