//! In-memory static inventory.
//!
//! Thread-safe backend suitable for development, testing, and labs whose
//! topology is known up front.

use async_trait::async_trait;
use dashmap::DashMap;

use nameip_core::error::{NameIpError, Result};
use nameip_core::traits::{HostQuery, VmQuery};
use nameip_core::types::{EntityKind, Nic};

/// In-memory inventory of VMs and hosts.
///
/// All operations are thread-safe and can be called concurrently.
#[derive(Debug, Default)]
pub struct StaticInventory {
    vms: DashMap<String, Vec<Nic>>,
    hosts: DashMap<String, String>,
}

impl StaticInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a VM with its NIC list, replacing any previous entry.
    pub fn add_vm(&self, name: impl Into<String>, nics: Vec<Nic>) {
        self.vms.insert(name.into(), nics);
    }

    /// Registers a host with its management address, replacing any previous
    /// entry.
    pub fn add_host(&self, name: impl Into<String>, address: impl Into<String>) {
        self.hosts.insert(name.into(), address.into());
    }

    /// Removes a VM, returning whether it was present.
    pub fn remove_vm(&self, name: &str) -> bool {
        self.vms.remove(name).is_some()
    }

    /// Removes a host, returning whether it was present.
    pub fn remove_host(&self, name: &str) -> bool {
        self.hosts.remove(name).is_some()
    }

    /// Returns the number of registered VMs.
    pub fn vm_count(&self) -> usize {
        self.vms.len()
    }

    /// Returns the number of registered hosts.
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

#[async_trait]
impl VmQuery for StaticInventory {
    async fn vm_nics(&self, vm_name: &str) -> Result<Vec<Nic>> {
        self.vms
            .get(vm_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NameIpError::EntityNotFound {
                kind: EntityKind::Vm,
                name: vm_name.to_string(),
            })
    }
}

#[async_trait]
impl HostQuery for StaticInventory {
    async fn host_address(&self, host_name: &str) -> Result<String> {
        self.hosts
            .get(host_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NameIpError::EntityNotFound {
                kind: EntityKind::Host,
                name: host_name.to_string(),
            })
    }
}
