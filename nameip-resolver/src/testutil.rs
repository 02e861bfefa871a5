//! Shared fixtures for the resolver tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use nameip_core::error::{NameIpError, Result};
use nameip_core::traits::{HostQuery, VmQuery};
use nameip_core::types::{EntityKind, IpVersion, Nic, ReportedDevice, ReportedIp};

/// Fixed inventory that counts remote calls, for memoization assertions.
#[derive(Default)]
pub(crate) struct MockInventory {
    vms: HashMap<String, Vec<Nic>>,
    hosts: HashMap<String, String>,
    pub(crate) vm_calls: AtomicUsize,
    pub(crate) host_calls: AtomicUsize,
}

impl MockInventory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_vm(mut self, name: &str, nics: Vec<Nic>) -> Self {
        self.vms.insert(name.to_string(), nics);
        self
    }

    pub(crate) fn with_host(mut self, name: &str, address: &str) -> Self {
        self.hosts.insert(name.to_string(), address.to_string());
        self
    }

    pub(crate) fn vm_calls(&self) -> usize {
        self.vm_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn host_calls(&self) -> usize {
        self.host_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VmQuery for MockInventory {
    async fn vm_nics(&self, vm_name: &str) -> Result<Vec<Nic>> {
        self.vm_calls.fetch_add(1, Ordering::SeqCst);
        self.vms
            .get(vm_name)
            .cloned()
            .ok_or_else(|| NameIpError::EntityNotFound {
                kind: EntityKind::Vm,
                name: vm_name.to_string(),
            })
    }
}

#[async_trait]
impl HostQuery for MockInventory {
    async fn host_address(&self, host_name: &str) -> Result<String> {
        self.host_calls.fetch_add(1, Ordering::SeqCst);
        self.hosts
            .get(host_name)
            .cloned()
            .ok_or_else(|| NameIpError::EntityNotFound {
                kind: EntityKind::Host,
                name: host_name.to_string(),
            })
    }
}

/// Builds a NIC with an optional MAC and a single reported device carrying
/// the given IPv4 literals.
pub(crate) fn nic(mac: Option<&str>, v4_addresses: &[&str]) -> Nic {
    Nic {
        name: "nic1".into(),
        mac: mac.map(|m| m.parse().unwrap()),
        reported_devices: vec![ReportedDevice {
            name: Some("eth0".into()),
            ips: v4_addresses
                .iter()
                .map(|address| ReportedIp {
                    address: (*address).into(),
                    version: IpVersion::V4,
                })
                .collect(),
        }],
    }
}
