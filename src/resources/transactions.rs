use crate::client::PlayMoneyClient;
use crate::error::Result;
use crate::pagination::{ListEndpoint, Paginator};
use crate::types::{Page, Transaction, TransactionQuery};

pub type TransactionPaginator = Paginator<ListEndpoint<Transaction, TransactionQuery>>;

/// `transactions` collection, filtered by market, user or type.
#[derive(Debug, Clone, Copy)]
pub struct TransactionResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> TransactionResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &TransactionQuery,
        cursor: Option<&str>,
    ) -> Result<Page<Transaction>> {
        self.client
            .get_page(&["transactions"], query, cursor)
            .await
    }

    #[must_use]
    pub fn paginate(&self, query: TransactionQuery) -> TransactionPaginator {
        Paginator::new(ListEndpoint::new(
            self.client.clone(),
            &["transactions"],
            query,
        ))
    }
}
