//! VM lookup variant.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tracing::{debug, instrument};

use nameip_core::constants::DEFAULT_MAC_NIC_INDEX;
use nameip_core::error::Result;
use nameip_core::traits::{MacToIp, VmQuery};

/// Resolves a VM name through its guest-agent-reported addresses, with the
/// MAC convention as fallback.
pub struct VmResolver {
    inventory: Arc<dyn VmQuery>,
    mac_mapper: Arc<dyn MacToIp>,
    fallback_nic_index: usize,
}

impl VmResolver {
    /// Creates a resolver using the default fallback NIC index.
    pub fn new(inventory: Arc<dyn VmQuery>, mac_mapper: Arc<dyn MacToIp>) -> Self {
        Self {
            inventory,
            mac_mapper,
            fallback_nic_index: DEFAULT_MAC_NIC_INDEX,
        }
    }

    /// Overrides which NIC's MAC feeds the fallback conversion.
    pub fn with_fallback_nic_index(mut self, index: usize) -> Self {
        self.fallback_nic_index = index;
        self
    }

    /// Resolves the named VM to an IPv4 address.
    ///
    /// Walks NICs → reported devices → reported IPs and returns the first
    /// IPv4. When the guest agent reports nothing, falls back to converting
    /// the MAC of the configured NIC index. `Ok(None)` means the VM exists
    /// but no convention produced an address.
    #[instrument(skip(self))]
    pub async fn lookup(&self, vm_name: &str) -> Result<Option<Ipv4Addr>> {
        let nics = self.inventory.vm_nics(vm_name).await?;

        if let Some(ip) = nics.iter().flat_map(|nic| nic.reported_v4_addresses()).next() {
            debug!(vm_name, %ip, "Resolved from reported addresses");
            return Ok(Some(ip));
        }

        let Some(mac) = nics.get(self.fallback_nic_index).and_then(|nic| nic.mac) else {
            debug!(vm_name, nic_index = self.fallback_nic_index, "No MAC for fallback");
            return Ok(None);
        };

        let ip = self.mac_mapper.mac_to_ip(&mac);
        debug!(vm_name, %mac, ?ip, "MAC fallback");
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::{NullMacMapper, PrefixMacMapper};
    use crate::testutil::{nic, MockInventory};

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_reported_address_wins() {
        let inventory = MockInventory::new()
            .with_vm("worker-01", vec![nic(Some("00:1a:4a:16:01:51"), &["10.0.0.5"])]);
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(PrefixMacMapper::new(10, 0)));

        assert_eq!(
            resolver.lookup("worker-01").await.unwrap(),
            Some(ip("10.0.0.5"))
        );
    }

    #[tokio::test]
    async fn test_first_reported_address_across_nics() {
        let inventory = MockInventory::new().with_vm(
            "worker-01",
            vec![
                nic(None, &[]),
                nic(None, &["192.168.1.9", "10.0.0.5"]),
            ],
        );
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(NullMacMapper));

        assert_eq!(
            resolver.lookup("worker-01").await.unwrap(),
            Some(ip("192.168.1.9"))
        );
    }

    #[tokio::test]
    async fn test_mac_fallback() {
        let inventory = MockInventory::new()
            .with_vm("agentless", vec![nic(Some("00:1a:4a:16:01:51"), &[])]);
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(PrefixMacMapper::new(10, 0)));

        assert_eq!(
            resolver.lookup("agentless").await.unwrap(),
            Some(Ipv4Addr::new(10, 0, 0x01, 0x51))
        );
    }

    #[tokio::test]
    async fn test_mac_fallback_uses_configured_nic_index() {
        let inventory = MockInventory::new().with_vm(
            "agentless",
            vec![
                nic(Some("00:1a:4a:16:00:00"), &[]),
                nic(Some("00:1a:4a:16:02:07"), &[]),
            ],
        );
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(PrefixMacMapper::new(10, 0)))
            .with_fallback_nic_index(1);

        assert_eq!(
            resolver.lookup("agentless").await.unwrap(),
            Some(Ipv4Addr::new(10, 0, 0x02, 0x07))
        );
    }

    #[tokio::test]
    async fn test_no_address_resolves_to_none() {
        let inventory = MockInventory::new()
            .with_vm("agentless", vec![nic(Some("00:1a:4a:16:01:51"), &[])]);
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(NullMacMapper));

        assert_eq!(resolver.lookup("agentless").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_nic_index_resolves_to_none() {
        let inventory = MockInventory::new().with_vm("bare", vec![]);
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(PrefixMacMapper::new(10, 0)));

        assert_eq!(resolver.lookup("bare").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_vm_is_not_found() {
        let inventory = MockInventory::new();
        let resolver = VmResolver::new(Arc::new(inventory), Arc::new(NullMacMapper));

        let err = resolver.lookup("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
