//! MAC address parsing and formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NameIpError;

/// A 48-bit MAC address.
///
/// Serializes as the colon-separated lowercase hex string the engine's wire
/// model uses, e.g. `"00:1a:4a:16:01:51"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a MAC address from its six octets.
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the six octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl FromStr for MacAddress {
    type Err = NameIpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let parts: Vec<&str> = raw.split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(NameIpError::InvalidMacAddress(raw.to_string()));
        }

        let mut octets = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return Err(NameIpError::InvalidMacAddress(raw.to_string()));
            }
            octets[i] = u8::from_str_radix(part, 16)
                .map_err(|_| NameIpError::InvalidMacAddress(raw.to_string()))?;
        }

        Ok(Self(octets))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = NameIpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
