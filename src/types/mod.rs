#![allow(missing_docs)]
//! Type definitions for the Play Money API
//!
//! Each struct mirrors one JSON resource. Fields use snake_case in Rust and
//! the API's camelCase on the wire; decoding applies format checks and
//! [`Validate`] applies the cross-field ones.

mod activity;
mod base;
mod comments;
mod finance;
mod graphs;
mod leaderboard;
mod lists;
mod market;
mod page;
mod user;
mod validate;

pub use activity::*;
pub use base::{AssetId, Cuid, HexColor, Timestamp};
pub(crate) use base::check_emoji;
pub use comments::*;
pub use finance::*;
pub use graphs::*;
pub use leaderboard::*;
pub use lists::*;
pub use market::*;
pub use page::*;
pub use user::*;
pub use validate::Validate;
