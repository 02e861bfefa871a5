//! # nameip Core
//!
//! Core types, errors, and traits for nameip, a cached name-to-IP resolution
//! library for virtualization test labs.
//!
//! This crate provides the foundational building blocks used by all other
//! nameip crates:
//!
//! - **Types**: Entity references, NIC and reported-device models, MAC addresses
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Cache and dispatch defaults
//! - **Traits**: Collaborator interfaces for inventory backends
//!
//! ## Example
//!
//! ```rust
//! use nameip_core::{EntityKind, EntityRef};
//!
//! // A lookup string may carry an explicit kind prefix
//! let entity = EntityRef::parse("vm:worker-01");
//! assert_eq!(entity.kind, Some(EntityKind::Vm));
//! assert_eq!(entity.name, "worker-01");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{NameIpError, Result};
pub use traits::*;
pub use types::*;
