#![allow(missing_docs)]

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::constants::API_KEY_HEADER;
use crate::error::{PlayMoneyError, PlayMoneyErrorCode, Result};
use crate::resources::{
    CommentResource, LeaderboardResource, ListResource, MarketResource, TransactionResource,
    UserResource,
};
use crate::types::{Page, Validate};

/// `{"data": ...}` wrapper around every single-resource response.
#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// HTTP client for the Play Money API.
///
/// Cheap to clone; clones share one connection pool. Resource accessors
/// (`markets()`, `users()`, ...) borrow the client, and the handles they
/// return keep their own clone so they can issue follow-up requests.
#[derive(Clone)]
pub struct PlayMoneyClient {
    http: Client,
    root: Url,
    authenticated: bool,
}

impl std::fmt::Debug for PlayMoneyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayMoneyClient")
            .field("root", &self.root.as_str())
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

impl PlayMoneyClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let root = config.api_root()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key).map_err(|e| {
                PlayMoneyError::with_cause(
                    PlayMoneyErrorCode::ConfigError,
                    "API key is not a valid header value",
                    e,
                )
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                PlayMoneyError::with_cause(
                    PlayMoneyErrorCode::NetworkError,
                    "Failed to create HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            root,
            authenticated: config.api_key.is_some(),
        })
    }

    /// Client configured from `PLAYMONEY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Client for the hosted API using `api_key` for mutations.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::default().with_api_key(api_key))
    }

    /// Versioned API root every path is resolved against.
    #[must_use]
    pub fn api_root(&self) -> &Url {
        &self.root
    }

    /// Check if the client sends an API key
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // =========================================================================
    // Resources
    // =========================================================================

    #[must_use]
    pub fn markets(&self) -> MarketResource<'_> {
        MarketResource::new(self)
    }

    #[must_use]
    pub fn users(&self) -> UserResource<'_> {
        UserResource::new(self)
    }

    #[must_use]
    pub fn comments(&self) -> CommentResource<'_> {
        CommentResource::new(self)
    }

    #[must_use]
    pub fn lists(&self) -> ListResource<'_> {
        ListResource::new(self)
    }

    #[must_use]
    pub fn transactions(&self) -> TransactionResource<'_> {
        TransactionResource::new(self)
    }

    #[must_use]
    pub fn leaderboard(&self) -> LeaderboardResource<'_> {
        LeaderboardResource::new(self)
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Resolve path segments against the API root, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(empty) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(PlayMoneyError::invalid_argument(format!(
                "Empty path segment at position {empty} in {segments:?}"
            )));
        }

        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|()| PlayMoneyError::config_error("API root cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a single resource and validate it.
    pub(crate) async fn get<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.endpoint(segments)?;
        let body = self
            .send(self.http.get(url.clone()), &Method::GET, &url)
            .await?;
        decode_data(&body, &url)
    }

    /// GET a resource that only exists for the key's owner, such as `users/me`.
    pub(crate) async fn get_authed<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.endpoint(segments)?;
        self.require_auth(&Method::GET, &url)?;
        let body = self
            .send(self.http.get(url.clone()), &Method::GET, &url)
            .await?;
        decode_data(&body, &url)
    }

    /// GET a single resource with query parameters.
    pub(crate) async fn get_with<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: DeserializeOwned + Validate,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.http.get(url.clone()).query(query);
        let body = self.send(request, &Method::GET, &url).await?;
        decode_data(&body, &url)
    }

    /// GET one page of a cursor-paginated list.
    pub(crate) async fn get_page<T, Q>(
        &self,
        segments: &[&str],
        query: &Q,
        cursor: Option<&str>,
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned + Validate,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let mut request = self.http.get(url.clone()).query(query);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let body = self.send(request, &Method::GET, &url).await?;
        let page: Page<T> = decode(&body, &url)?;
        page.validate()?;
        Ok(page)
    }

    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned + Validate,
        B: Serialize + ?Sized,
    {
        self.mutate(Method::POST, segments, body).await
    }

    pub(crate) async fn patch<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned + Validate,
        B: Serialize + ?Sized,
    {
        self.mutate(Method::PATCH, segments, body).await
    }

    /// DELETE a resource. The response body, if any, is ignored.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        self.require_auth(&Method::DELETE, &url)?;
        self.send(self.http.delete(url.clone()), &Method::DELETE, &url)
            .await?;
        Ok(())
    }

    async fn mutate<T, B>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned + Validate,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.require_auth(&method, &url)?;
        let request = self.http.request(method.clone(), url.clone()).json(body);
        let body = self.send(request, &method, &url).await?;
        decode_data(&body, &url)
    }

    fn require_auth(&self, method: &Method, url: &Url) -> Result<()> {
        if self.authenticated {
            return Ok(());
        }
        Err(PlayMoneyError::auth_error(format!(
            "{method} {url} requires an API key; none is configured"
        )))
    }

    async fn send(&self, request: RequestBuilder, method: &Method, url: &Url) -> Result<String> {
        debug!(%method, %url, "Requesting");

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("{method} {url} timed out")
            } else {
                format!("Failed to {method} {url}")
            };
            PlayMoneyError::with_cause(PlayMoneyErrorCode::NetworkError, message, e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PlayMoneyError::with_cause(
                PlayMoneyErrorCode::NetworkError,
                format!("Failed to read response body of {method} {url}"),
                e,
            )
        })?;
        debug!(status = status.as_u16(), %url, bytes = body.len(), "Response");

        if status.is_success() {
            return Ok(body);
        }

        let detail = api_error_detail(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        error!(status = status.as_u16(), %method, %url, %detail, "HTTP error occurred");

        let err = match status {
            StatusCode::NOT_FOUND => {
                PlayMoneyError::not_found(format!("Not found: {url} ({detail})"))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                PlayMoneyError::auth_error(format!("{method} {url} was rejected: {detail}"))
            }
            _ => PlayMoneyError::api_error(format!("{method} {url} failed: {detail}")),
        };
        Err(err.with_status(status.as_u16()))
    }
}

fn decode<T: DeserializeOwned>(body: &str, url: &Url) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        PlayMoneyError::with_cause(
            PlayMoneyErrorCode::ParseError,
            format!("Failed to parse response from {url}: {e}"),
            e,
        )
    })
}

fn decode_data<T: DeserializeOwned + Validate>(body: &str, url: &Url) -> Result<T> {
    let envelope: DataEnvelope<T> = decode(body, url)?;
    envelope.data.validate()?;
    Ok(envelope.data)
}

/// Pull the human-readable message out of an error body such as
/// `{"error": "Market not found"}`.
fn api_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = match value.get("error") {
        Some(serde_json::Value::String(message)) => Some(message.clone()),
        Some(nested) => nested
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        None => None,
    };
    detail.or_else(|| {
        value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    })
}
