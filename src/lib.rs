#![allow(missing_docs)]
//! # playmoney-sdk
//!
//! Typed client for the [Play Money](https://playmoney.dev) prediction-market API.
//!
//! This crate provides:
//! - Schemas for markets, options, users, positions, transactions, comments
//!   and lists, checked on decode and validated for cross-field consistency
//! - A thin HTTP client with cursor pagination
//! - Authenticated POST/PATCH/DELETE calls using an API key
//!
//! ## Example
//!
//! ```rust,no_run
//! use playmoney_sdk::types::{MarketQuery, MarketStatus};
//! use playmoney_sdk::PlayMoneyClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PlayMoneyClient::from_env()?;
//!
//!     let market = client.markets().get("cm5ifmwfo001g24d2r7fzu34u").await?;
//!     println!("{} ({})", market.question, market.url());
//!
//!     for comment in market.comments().await? {
//!         println!("{}: {}", comment.author.username, comment.content);
//!     }
//!
//!     let query = MarketQuery {
//!         status: Some(MarketStatus::Active),
//!         ..Default::default()
//!     };
//!     let active = client.markets().paginate(query).max_pages(5).collect_all().await?;
//!     println!("Found {} active markets", active.len());
//!
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod pagination;
pub mod resources;
pub mod types;

/// The SDK crate version (from `CARGO_PKG_VERSION`).
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use client::PlayMoneyClient;
pub use config::ClientConfig;
pub use error::{PlayMoneyError, PlayMoneyErrorCode, Result, SchemaError};
pub use pagination::{PageSource, Paginator};
