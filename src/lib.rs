// cosmos-repository - Cosmos DB data-access layer
// Copyright (c) 2025 Cosmos Repository Contributors
// Licensed under the MIT License

//! # cosmos-repository - Azure Cosmos DB data access
//!
//! A thin data-access layer over Azure Cosmos DB: dependency-injected
//! handlers for point reads, SQL and typed queries, pagination and command
//! operations against containers addressed by configuration keys.
//!
//! ## Overview
//!
//! This library provides:
//! - **Options binding** from external configuration, mapping logical
//!   container keys to container name and partition-key path
//! - **A single shared client**, lazily constructed on first use
//! - **Container provisioning** with idempotent create-if-absent for the
//!   database and each configured container
//! - **Generic handlers** for queries, pagination, counts and commands over
//!   any serializable item type
//!
//! ## Architecture
//!
//! - [`config`] - options schema, secure credentials and the TOML loader
//! - [`domain`] - error taxonomy, result alias and the record capability
//! - [`providers`] - shared client and container resolution
//! - [`handlers`] - query, paginated-query and command handlers
//! - [`repositories`] - the read-only façade
//! - [`composition`] - the composition root wiring everything as singletons
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cosmos_repository::composition::CosmosDbDependencies;
//! use cosmos_repository::handlers::{Filter, ItemQuery};
//! use serde_json::{json, Value};
//!
//! #[tokio::main]
//! async fn main() -> cosmos_repository::domain::Result<()> {
//!     let deps = CosmosDbDependencies::from_config_file("repository.toml")?;
//!
//!     deps.command_handler
//!         .create_item(json!({"id": "o1", "pk": "o1", "total": 10}), "orders", "o1")
//!         .await?;
//!
//!     let order: Value = deps
//!         .read_only_repository
//!         .get_item_by_id("o1", "orders")
//!         .await?;
//!
//!     let count = deps
//!         .paginated_query_handler
//!         .count_items("orders", Some(&Filter::gt("total", 5)))
//!         .await?;
//!
//!     let first_page: Vec<Value> = deps
//!         .paginated_query_handler
//!         .read_paginated_items("orders", &ItemQuery::new(), 1, 20)
//!         .await?;
//!
//!     println!("read {order}, {count} matching, {} on page 1", first_page.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`domain::Result`]. Configuration and validation
//! failures are raised before any network call; failures from the Cosmos DB
//! service propagate unmodified inside
//! [`domain::RepositoryError::Cosmos`] - this layer does not retry,
//! translate or swallow them. See
//! [`domain::RepositoryError::is_not_found`] and
//! [`domain::RepositoryError::is_conflict`] for the common classifications.
//!
//! ## Logging
//!
//! Diagnostics use the `tracing` crate; container-resolution failures are
//! logged at error level before the error is returned:
//!
//! ```rust,no_run
//! use tracing::info;
//!
//! info!(container_key = "orders", "resolving container");
//! ```

pub mod composition;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod providers;
pub mod repositories;

// Re-export the main entry points at the crate root
pub use composition::CosmosDbDependencies;
pub use config::{ConnectionMode, ContainerOptions, RepositoryOptions};
pub use domain::{ContainerRecord, RepositoryError, Result};
pub use handlers::{CommandHandler, Filter, ItemQuery, PaginatedQueryHandler, QueryHandler};
pub use repositories::ReadOnlyRepository;
