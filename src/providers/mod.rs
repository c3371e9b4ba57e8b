//! Client and container provisioning.
//!
//! [`CosmosClientProvider`] owns the single lazily-created client shared by
//! the whole process; [`ContainerProvider`] resolves logical container keys
//! to provisioned [`azure_data_cosmos::clients::ContainerClient`] handles on
//! top of it.

pub mod client;
pub mod container;

pub use client::CosmosClientProvider;
pub use container::{ContainerProvider, CosmosContainerProvider};
