//! TTL cache for resolved entity addresses.
//!
//! Coarse-locked in-memory cache shared by every lookup variant.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{AddressCache, CacheStats, CachedAddress};
