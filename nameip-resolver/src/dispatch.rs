//! Multi-variant name resolution with a shared cache.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use nameip_cache::AddressCache;
use nameip_core::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_MAC_NIC_INDEX};
use nameip_core::error::{NameIpError, Result};
use nameip_core::traits::{HostQuery, MacToIp, VmQuery};
use nameip_core::types::{EntityKind, EntityRef};

use crate::host::HostResolver;
use crate::vm::VmResolver;

/// Resolver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// How long a resolution outcome stays fresh, in seconds.
    pub cache_ttl_seconds: u64,
    /// NIC index whose MAC feeds the VM fallback conversion.
    pub fallback_nic_index: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECS,
            fallback_nic_index: DEFAULT_MAC_NIC_INDEX,
        }
    }
}

/// Resolves entity names to IPv4 addresses across the known entity kinds.
///
/// A lookup string with a recognized `kind:` prefix is delegated to exactly
/// that variant, and the variant's own error surfaces. A bare name tries
/// each kind in [`EntityKind::ALL`] order; per-kind not-found and
/// failed-resolution outcomes are non-fatal until every kind has been tried.
///
/// Outcomes are memoized in the shared cache under `<collection>-<name>`
/// keys. Remote lookups run outside the cache lock, so two tasks racing on
/// the same cold key may both query the engine; the later write wins.
pub struct NameResolver {
    cache: Arc<AddressCache>,
    cache_ttl: Duration,
    vm: VmResolver,
    host: HostResolver,
}

impl NameResolver {
    /// Creates a resolver with the default configuration.
    pub fn new(
        cache: Arc<AddressCache>,
        vm_query: Arc<dyn VmQuery>,
        host_query: Arc<dyn HostQuery>,
        mac_mapper: Arc<dyn MacToIp>,
    ) -> Self {
        Self::with_config(
            ResolverConfig::default(),
            cache,
            vm_query,
            host_query,
            mac_mapper,
        )
    }

    /// Creates a resolver with custom configuration.
    pub fn with_config(
        config: ResolverConfig,
        cache: Arc<AddressCache>,
        vm_query: Arc<dyn VmQuery>,
        host_query: Arc<dyn HostQuery>,
        mac_mapper: Arc<dyn MacToIp>,
    ) -> Self {
        let vm = VmResolver::new(vm_query, mac_mapper)
            .with_fallback_nic_index(config.fallback_nic_index);
        let host = HostResolver::new(host_query);

        Self {
            cache,
            cache_ttl: Duration::from_secs(config.cache_ttl_seconds),
            vm,
            host,
        }
    }

    /// The shared cache, for administrative access such as
    /// [`reset`](AddressCache::reset).
    pub fn cache(&self) -> &AddressCache {
        &self.cache
    }

    /// Resolves a lookup string of the form `name` or `kind:name`.
    #[instrument(skip(self))]
    pub async fn look_up(&self, name: &str) -> Result<Ipv4Addr> {
        let entity = EntityRef::parse(name);

        if let Some(kind) = entity.kind {
            return self.resolve_kind(kind, &entity.name).await;
        }

        for kind in EntityKind::ALL {
            match self.resolve_kind(kind, &entity.name).await {
                Ok(ip) => return Ok(ip),
                Err(e) if e.is_not_found() || e.is_resolution_failure() => {
                    debug!(%kind, name = %entity.name, error = %e, "Kind could not resolve, trying next");
                }
                Err(e) => return Err(e),
            }
        }

        Err(NameIpError::IpLookupFailed {
            key: name.to_string(),
        })
    }

    /// Resolves a name against one specific entity kind, through the cache.
    ///
    /// A fresh cached outcome is returned without touching the engine; this
    /// includes cached no-address outcomes, which fail the lookup again. A
    /// miss or stale entry triggers one remote resolution whose outcome
    /// overwrites the entry.
    #[instrument(skip(self))]
    pub async fn resolve_kind(&self, kind: EntityKind, name: &str) -> Result<Ipv4Addr> {
        let key = kind.cache_key(name);

        if let Some(entry) = self.cache.get(&key) {
            debug!(%key, "Cache hit");
            return entry.ip.ok_or(NameIpError::IpLookupFailed { key });
        }

        debug!(%key, "Cache miss, resolving");
        let ip = self.fetch(kind, name).await?;
        self.cache.set(&key, ip, self.cache_ttl);

        match ip {
            Some(ip) => {
                info!(%key, %ip, "Resolved");
                Ok(ip)
            }
            None => Err(NameIpError::IpLookupFailed { key }),
        }
    }

    async fn fetch(&self, kind: EntityKind, name: &str) -> Result<Option<Ipv4Addr>> {
        match kind {
            EntityKind::Vm => self.vm.lookup(name).await,
            EntityKind::Host => self.host.lookup(name).await.map(Some),
        }
    }
}
