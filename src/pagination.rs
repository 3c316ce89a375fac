//! Cursor pagination over list endpoints.
//!
//! A [`Paginator`] drives any [`PageSource`], following `pageInfo.endCursor`
//! until the API reports no next page. Items can be consumed page by page,
//! collected into one `Vec`, or streamed.

use std::collections::HashSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::PlayMoneyClient;
use crate::error::{PlayMoneyError, Result};
use crate::types::{Page, Validate};

/// Anything that can return one page for a given cursor.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Self::Item>>;
}

/// A list endpoint plus its fixed query parameters.
pub struct ListEndpoint<T, Q> {
    client: PlayMoneyClient,
    segments: Vec<String>,
    query: Q,
    _item: PhantomData<fn() -> T>,
}

impl<T, Q> ListEndpoint<T, Q> {
    pub(crate) fn new(client: PlayMoneyClient, segments: &[&str], query: Q) -> Self {
        Self {
            client,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            query,
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<T, Q> PageSource for ListEndpoint<T, Q>
where
    T: DeserializeOwned + Validate + Send + 'static,
    Q: Serialize + Send + Sync,
{
    type Item = T;

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<T>> {
        let segments: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        self.client.get_page(&segments, &self.query, cursor).await
    }
}

pub struct Paginator<S> {
    source: S,
    cursor: Option<String>,
    /// Cursors already requested; a repeat means the server is cycling.
    visited: HashSet<String>,
    pages_fetched: u32,
    max_pages: Option<u32>,
    done: bool,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cursor: None,
            visited: HashSet::new(),
            pages_fetched: 0,
            max_pages: None,
            done: false,
        }
    }

    /// Resume from a cursor returned by an earlier walk.
    #[must_use]
    pub fn starting_at(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Stop after `max_pages` pages even if more are available.
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Cursor the next request would use.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fetch the next page, or `None` once the walk has ended.
    pub async fn next_page(&mut self) -> Result<Option<Page<S::Item>>> {
        if self.done {
            return Ok(None);
        }
        if let Some(max_pages) = self.max_pages {
            if self.pages_fetched >= max_pages {
                debug!(max_pages, "Page limit reached");
                self.done = true;
                return Ok(None);
            }
        }

        let page = self.source.fetch_page(self.cursor.as_deref()).await?;
        self.pages_fetched += 1;
        if let Some(cursor) = self.cursor.take() {
            self.visited.insert(cursor);
        }

        match page.page_info.next_cursor() {
            None => self.done = true,
            Some(next) if self.visited.contains(next) => {
                warn!(cursor = next, "Cursor already visited; stopping pagination");
                self.done = true;
            }
            Some(next) => self.cursor = Some(next.to_string()),
        }

        Ok(Some(page))
    }

    /// Walk every remaining page and return their items in order.
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.data);
        }
        debug!(
            items = items.len(),
            pages = self.pages_fetched,
            "Pagination finished"
        );
        Ok(items)
    }

    /// Item-level stream; the next page is requested once the current one
    /// is drained.
    pub fn into_stream(self) -> impl Stream<Item = Result<S::Item>> {
        stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            let items = page.map(|page| page.data.into_iter().map(Ok::<_, PlayMoneyError>));
            Ok::<_, PlayMoneyError>(items.map(|items| (stream::iter(items), paginator)))
        })
        .try_flatten()
    }
}
