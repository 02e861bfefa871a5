//! VM network interface model.
//!
//! Mirrors the slice of the engine's VM object model that name resolution
//! walks: NICs carry guest-agent-supplied reported devices, each of which
//! lists the addresses the guest reports for that device.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::MacAddress;

/// IP protocol version of a reported address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpVersion {
    /// IPv4.
    #[serde(rename = "v4")]
    V4,
    /// IPv6.
    #[serde(rename = "v6")]
    V6,
    /// Anything a future engine dialect may report.
    #[serde(other, rename = "unknown")]
    Unknown,
}

/// A single address reported by the guest agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportedIp {
    /// Address literal as reported.
    pub address: String,
    /// Protocol version of the address.
    pub version: IpVersion,
}

impl ReportedIp {
    /// The address as an IPv4 literal, when it is one.
    pub fn as_v4(&self) -> Option<Ipv4Addr> {
        if self.version == IpVersion::V4 {
            self.address.parse().ok()
        } else {
            None
        }
    }
}

/// A guest device the agent reports addresses for.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportedDevice {
    /// Device name inside the guest, e.g. `eth0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Addresses reported for the device.
    #[serde(default)]
    pub ips: Vec<ReportedIp>,
}

/// A VM network interface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nic {
    /// Interface name, e.g. `nic1`.
    pub name: String,
    /// MAC address configured on the interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<MacAddress>,
    /// Guest-agent-reported devices behind the interface.
    #[serde(default)]
    pub reported_devices: Vec<ReportedDevice>,
}

impl Nic {
    /// Every IPv4 address the guest agent reports for this interface,
    /// in reported order.
    pub fn reported_v4_addresses(&self) -> Vec<Ipv4Addr> {
        self.reported_devices
            .iter()
            .flat_map(|device| device.ips.iter())
            .filter_map(ReportedIp::as_v4)
            .collect()
    }
}
