//! Query and command handlers.
//!
//! Generic operations over items in configured containers:
//!
//! - [`QueryHandler`] - point reads, raw SQL queries and typed queries
//! - [`PaginatedQueryHandler`] - page windows and predicate counts
//! - [`CommandHandler`] - create, upsert, replace and delete
//!
//! Every handler resolves its container per operation through a shared
//! [`ContainerProvider`](crate::providers::ContainerProvider) and validates
//! its arguments before any network call.

pub mod command;
pub mod paginated;
pub mod query;
pub mod query_builder;

pub use command::CommandHandler;
pub use paginated::PaginatedQueryHandler;
pub use query::{drain_feed_pager, QueryHandler};
pub use query_builder::{Filter, FilterValue, ItemQuery};
