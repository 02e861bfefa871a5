//! Collaborator traits for nameip.
//!
//! These traits define the interfaces the lookup variants resolve through,
//! enabling multiple backends and testing.

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MacAddress, Nic};

// ═══════════════════════════════════════════════════════════════════════════════
// VM QUERY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for querying a VM's network interfaces.
///
/// Implementations might use:
/// - The management engine's REST API (production)
/// - An in-memory inventory (testing/development)
#[async_trait]
pub trait VmQuery: Send + Sync {
    /// Returns the NIC list of the named VM.
    ///
    /// Fails with an entity-not-found error when no VM carries the name.
    async fn vm_nics(&self, vm_name: &str) -> Result<Vec<Nic>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST QUERY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for querying a host's configured management address.
#[async_trait]
pub trait HostQuery: Send + Sync {
    /// Returns the management address of the named host, as configured.
    ///
    /// Fails with an entity-not-found error when no host carries the name.
    async fn host_address(&self, host_name: &str) -> Result<String>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// MAC→IP CONVERSION TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Heuristic conversion of a MAC address to an IPv4 address.
///
/// Used as the VM lookup fallback when the guest agent reports no address.
/// The conversion is a lab convention, so it is pluggable; `None` means the
/// convention cannot produce an address for this MAC.
pub trait MacToIp: Send + Sync {
    /// Converts a MAC address to an IPv4 address, when the convention allows.
    fn mac_to_ip(&self, mac: &MacAddress) -> Option<Ipv4Addr>;
}
