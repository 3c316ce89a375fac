#![allow(missing_docs)]

pub const DEFAULT_API_BASE_URL: &str = "https://api.playmoney.dev";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const SUPPORTED_API_VERSIONS: &[&str] = &["v1"];
pub const WEB_BASE_URL: &str = "https://playmoney.dev";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const USER_AGENT_PREFIX: &str = "playmoney-sdk-rs";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Asset id used by ledger entries that move the house currency.
pub const PRIMARY_ASSET_ID: &str = "PRIMARY";

pub const ENV_API_KEY: &str = "PLAYMONEY_API_KEY";
pub const ENV_BASE_URL: &str = "PLAYMONEY_BASE_URL";
pub const ENV_API_VERSION: &str = "PLAYMONEY_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "PLAYMONEY_TIMEOUT_SECS";
