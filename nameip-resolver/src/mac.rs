//! MAC→IP conversion conventions.

use std::net::Ipv4Addr;

use nameip_core::traits::MacToIp;
use nameip_core::types::MacAddress;

/// The static lab convention: a fixed /16 prefix plus the final two MAC
/// octets.
///
/// `00:1a:4a:16:01:51` under prefix `10.0` maps to `10.0.1.81`. Both low
/// octets zero would name the network itself, so that MAC has no address
/// under this convention.
#[derive(Clone, Copy, Debug)]
pub struct PrefixMacMapper {
    prefix: [u8; 2],
}

impl PrefixMacMapper {
    /// Creates a mapper for the `first.second.0.0/16` network.
    pub fn new(first: u8, second: u8) -> Self {
        Self {
            prefix: [first, second],
        }
    }
}

impl MacToIp for PrefixMacMapper {
    fn mac_to_ip(&self, mac: &MacAddress) -> Option<Ipv4Addr> {
        let octets = mac.octets();
        if octets[4] == 0 && octets[5] == 0 {
            return None;
        }
        Some(Ipv4Addr::new(
            self.prefix[0],
            self.prefix[1],
            octets[4],
            octets[5],
        ))
    }
}

/// Disables the MAC fallback entirely.
///
/// For labs without a MAC addressing convention, where only guest-agent
/// reported addresses count.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMacMapper;

impl MacToIp for NullMacMapper {
    fn mac_to_ip(&self, _mac: &MacAddress) -> Option<Ipv4Addr> {
        None
    }
}
