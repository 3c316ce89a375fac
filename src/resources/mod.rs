//! Resource-oriented entry points.
//!
//! Each `*Resource` borrows a [`PlayMoneyClient`](crate::PlayMoneyClient) and
//! maps one API collection. Single-object lookups return a handle that derefs
//! to the fetched value and issues follow-up requests for it.

mod comments;
mod leaderboard;
mod lists;
mod markets;
mod transactions;
mod users;

pub use comments::{CommentHandle, CommentResource};
pub use leaderboard::LeaderboardResource;
pub use lists::{ListHandle, ListPaginator, ListResource};
pub use markets::{MarketHandle, MarketPaginator, MarketResource, PositionPaginator};
pub use transactions::{TransactionPaginator, TransactionResource};
pub use users::{UserHandle, UserResource};
