//! Host lookup variant.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tracing::{debug, instrument};

use nameip_core::error::{NameIpError, Result};
use nameip_core::traits::HostQuery;

/// Resolves a host name through its configured management address.
///
/// One remote call, no traversal: the address is whatever the host was
/// registered with.
pub struct HostResolver {
    inventory: Arc<dyn HostQuery>,
}

impl HostResolver {
    /// Creates a resolver over the given inventory.
    pub fn new(inventory: Arc<dyn HostQuery>) -> Self {
        Self { inventory }
    }

    /// Resolves the named host to an IPv4 address.
    ///
    /// A management address that is not an IPv4 literal fails the lookup.
    #[instrument(skip(self))]
    pub async fn lookup(&self, host_name: &str) -> Result<Ipv4Addr> {
        let address = self.inventory.host_address(host_name).await?;

        let ip = address
            .parse()
            .map_err(|_| NameIpError::InvalidHostAddress {
                name: host_name.to_string(),
                address: address.clone(),
            })?;

        debug!(host_name, %ip, "Resolved host address");
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockInventory;

    #[tokio::test]
    async fn test_lookup() {
        let inventory = MockInventory::new().with_host("node-3", "10.0.1.13");
        let resolver = HostResolver::new(Arc::new(inventory));

        assert_eq!(
            resolver.lookup("node-3").await.unwrap(),
            Ipv4Addr::new(10, 0, 1, 13)
        );
    }

    #[tokio::test]
    async fn test_unknown_host_is_not_found() {
        let inventory = MockInventory::new();
        let resolver = HostResolver::new(Arc::new(inventory));

        let err = resolver.lookup("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fqdn_address_is_resolution_failure() {
        let inventory = MockInventory::new().with_host("node-3", "node-3.lab.example.com");
        let resolver = HostResolver::new(Arc::new(inventory));

        let err = resolver.lookup("node-3").await.unwrap_err();
        assert!(err.is_resolution_failure());
    }
}
