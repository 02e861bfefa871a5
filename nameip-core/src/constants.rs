//! Defaults and collection names shared across the nameip crates.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default lifetime of a cached name→IP mapping, in seconds.
///
/// After this long the entry is stale and the next access re-resolves it.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Pattern matching every entity kind or entity name in a cache reset.
pub const MATCH_ANY_PATTERN: &str = ".+";

// ═══════════════════════════════════════════════════════════════════════════════
// ENTITY COLLECTIONS
// ═══════════════════════════════════════════════════════════════════════════════
// Collection names double as cache-key prefixes, so they must stay distinct.

/// REST collection holding virtual machines.
pub const VMS_COLLECTION: &str = "vms";

/// REST collection holding hypervisor hosts.
pub const HOSTS_COLLECTION: &str = "hosts";

/// Separator between an entity collection and an entity name in a cache key.
pub const CACHE_KEY_SEPARATOR: char = '-';

/// Separator between an explicit kind prefix and a name in a lookup string.
pub const KIND_PREFIX_SEPARATOR: char = ':';

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLUTION DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// NIC index whose MAC address feeds the MAC→IP fallback.
pub const DEFAULT_MAC_NIC_INDEX: usize = 0;

/// Default HTTP timeout for management engine requests, in seconds.
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 30;
