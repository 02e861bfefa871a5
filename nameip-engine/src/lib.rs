//! # nameip Engine Backends
//!
//! Inventory backends the lookup variants resolve through:
//!
//! - **Engine**: REST client for an oVirt-compatible management engine
//! - **Memory**: In-memory static inventory for development and testing
//!
//! ## Example
//!
//! ```rust,ignore
//! use nameip_engine::{EngineClient, EngineConfig};
//!
//! let config = EngineConfig::new(
//!     "https://engine.lab/ovirt-engine/api",
//!     "admin@internal",
//!     "secret",
//! );
//! let client = EngineClient::with_config(config)?;
//! let nics = client.vm_nics("worker-01").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod memory;

pub use client::{EngineClient, EngineConfig};
pub use memory::StaticInventory;

// Re-export the traits from core
pub use nameip_core::traits::{HostQuery, VmQuery};
