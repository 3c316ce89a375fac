//! Client configuration.
//!
//! Defaults point at the public hosted instance. `ClientConfig::from_env`
//! layers `PLAYMONEY_*` environment variables (and a `.env` file, if any)
//! over those defaults.

use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_KEY,
    ENV_API_VERSION, ENV_BASE_URL, ENV_TIMEOUT_SECS, SUPPORTED_API_VERSIONS, USER_AGENT_PREFIX,
};
use crate::error::{PlayMoneyError, Result};

/// Settings used to build a [`PlayMoneyClient`](crate::client::PlayMoneyClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// API host, without the version segment.
    pub base_url: String,
    /// API version path segment. Only `v1` is supported.
    pub version: String,
    /// Key sent as `x-api-key`; required for mutations.
    pub api_key: Option<String>,
    /// Timeout applied to every request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: format!("{USER_AGENT_PREFIX}/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from `PLAYMONEY_*` environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(key) = env_var(ENV_API_KEY) {
            config.api_key = Some(key);
        }
        if let Some(base_url) = env_var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(version) = env_var(ENV_API_VERSION) {
            config.version = version;
        }
        if let Some(timeout) = env_var(ENV_TIMEOUT_SECS) {
            let secs: u64 = timeout.parse().map_err(|e| {
                PlayMoneyError::config_error(format!("Invalid {ENV_TIMEOUT_SECS} '{timeout}': {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the settings and return the versioned API root, e.g.
    /// `https://api.playmoney.dev/v1/`.
    pub fn api_root(&self) -> Result<Url> {
        self.validate()?;

        let mut root = Url::parse(self.base_url.trim_end_matches('/')).map_err(|e| {
            PlayMoneyError::with_cause(
                crate::error::PlayMoneyErrorCode::ConfigError,
                format!("Invalid base URL '{}'", self.base_url),
                e,
            )
        })?;

        {
            let mut segments = root.path_segments_mut().map_err(|()| {
                PlayMoneyError::config_error(format!(
                    "Base URL '{}' cannot be used as an API root",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().push(&self.version).push("");
        }

        Ok(root)
    }

    fn validate(&self) -> Result<()> {
        if !SUPPORTED_API_VERSIONS.contains(&self.version.as_str()) {
            return Err(PlayMoneyError::config_error(format!(
                "Unsupported API version '{}'; supported: {}",
                self.version,
                SUPPORTED_API_VERSIONS.join(", ")
            )));
        }

        if self.timeout.is_zero() {
            return Err(PlayMoneyError::config_error("Request timeout must be non-zero"));
        }

        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err(PlayMoneyError::config_error("API key is empty"));
        }

        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(PlayMoneyError::config_error(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ))),
            Err(e) => Err(PlayMoneyError::config_error(format!(
                "Invalid base URL '{}': {e}",
                self.base_url
            ))),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
