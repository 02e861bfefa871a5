//! Entity kinds and lookup-string parsing.
//!
//! - [`EntityKind`]: The collections a name can be resolved against
//! - [`EntityRef`]: A parsed lookup string, optionally carrying a kind prefix

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CACHE_KEY_SEPARATOR, HOSTS_COLLECTION, KIND_PREFIX_SEPARATOR, VMS_COLLECTION,
};
use crate::error::NameIpError;

/// Kind of managed entity a name can be resolved against.
///
/// The declaration order is the dispatch order used when a lookup string
/// carries no explicit kind prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A virtual machine, resolved through its reported guest addresses.
    Vm,
    /// A hypervisor host, resolved through its management address.
    Host,
}

impl EntityKind {
    /// All kinds, in dispatch order.
    pub const ALL: [EntityKind; 2] = [EntityKind::Vm, EntityKind::Host];

    /// Name of the REST collection holding this kind of entity.
    ///
    /// Doubles as the cache-key prefix.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Vm => VMS_COLLECTION,
            EntityKind::Host => HOSTS_COLLECTION,
        }
    }

    /// Composite cache key for an entity of this kind.
    ///
    /// Format: `<collection>-<name>`, e.g. `vms-myvm`.
    pub fn cache_key(&self, name: &str) -> String {
        format!("{}{}{}", self.collection(), CACHE_KEY_SEPARATOR, name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vm => write!(f, "vm"),
            EntityKind::Host => write!(f, "host"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = NameIpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vm" | "vms" => Ok(EntityKind::Vm),
            "host" | "hosts" => Ok(EntityKind::Host),
            other => Err(NameIpError::InvalidEntityKind(other.to_string())),
        }
    }
}

/// A parsed lookup string.
///
/// `"vm:worker-01"` pins the lookup to the VM collection; a bare
/// `"worker-01"` leaves the kind open and every collection is tried in
/// dispatch order. A prefix that names no known kind is treated as part of
/// the name itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRef {
    /// Explicit kind, when the lookup string carried a recognized prefix.
    pub kind: Option<EntityKind>,
    /// The entity name to resolve.
    pub name: String,
}

impl EntityRef {
    /// Parses a lookup string of the form `name` or `kind:name`.
    pub fn parse(raw: &str) -> Self {
        if let Some((prefix, rest)) = raw.split_once(KIND_PREFIX_SEPARATOR) {
            if let Ok(kind) = prefix.parse::<EntityKind>() {
                return Self {
                    kind: Some(kind),
                    name: rest.to_string(),
                };
            }
        }
        Self {
            kind: None,
            name: raw.to_string(),
        }
    }
}
