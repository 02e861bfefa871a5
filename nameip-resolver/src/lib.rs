//! # nameip Resolver
//!
//! Cache-backed resolution of entity names to IPv4 addresses.
//!
//! A [`NameResolver`] dispatches a lookup string across the known entity
//! kinds (VM, then host), memoizing outcomes in a shared
//! [`AddressCache`](nameip_cache::AddressCache). The [`IpInjector`] wraps
//! async functions declared against an address so they can be invoked with a
//! name instead.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nameip_cache::AddressCache;
//! use nameip_resolver::{NameResolver, PrefixMacMapper};
//!
//! let resolver = NameResolver::new(
//!     Arc::new(AddressCache::new()),
//!     engine.clone(),
//!     engine.clone(),
//!     Arc::new(PrefixMacMapper::new(10, 0)),
//! );
//! let ip = resolver.look_up("vm:worker-01").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dispatch;
mod host;
mod inject;
mod mac;
mod vm;

#[cfg(test)]
pub(crate) mod testutil;

pub use dispatch::{NameResolver, ResolverConfig};
pub use host::HostResolver;
pub use inject::{IpArg, IpInjector, NameArg};
pub use mac::{NullMacMapper, PrefixMacMapper};
pub use vm::VmResolver;
