//! Address parameter injection.
//!
//! Lets an async function declared against an address (or list of
//! addresses) be invoked with an entity name (or list of names) instead,
//! with resolution performed transparently on the way in.

use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use nameip_core::error::{NameIpError, Result};

use crate::dispatch::NameResolver;

/// The name-side argument: one entity name or a list of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameArg {
    /// A single lookup string.
    One(String),
    /// Several lookup strings, resolved in order.
    Many(Vec<String>),
}

impl NameArg {
    fn is_empty(&self) -> bool {
        match self {
            NameArg::One(name) => name.is_empty(),
            NameArg::Many(names) => names.is_empty(),
        }
    }
}

impl From<&str> for NameArg {
    fn from(name: &str) -> Self {
        NameArg::One(name.to_string())
    }
}

impl From<String> for NameArg {
    fn from(name: String) -> Self {
        NameArg::One(name)
    }
}

impl From<Vec<String>> for NameArg {
    fn from(names: Vec<String>) -> Self {
        NameArg::Many(names)
    }
}

/// The address-side argument: one address or a list of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IpArg {
    /// A single address.
    One(Ipv4Addr),
    /// Several addresses, in the order of the names they came from.
    Many(Vec<Ipv4Addr>),
}

impl IpArg {
    fn is_empty(&self) -> bool {
        match self {
            IpArg::One(_) => false,
            IpArg::Many(ips) => ips.is_empty(),
        }
    }
}

impl From<Ipv4Addr> for IpArg {
    fn from(ip: Ipv4Addr) -> Self {
        IpArg::One(ip)
    }
}

impl From<Vec<Ipv4Addr>> for IpArg {
    fn from(ips: Vec<Ipv4Addr>) -> Self {
        IpArg::Many(ips)
    }
}

/// Injects resolved addresses into functions invoked by entity name.
///
/// Constructed with the resolver and the names of the two parameters it
/// mediates between; the names only feed diagnostics and error messages.
/// An explicitly supplied address always wins and no lookup happens; a
/// missing address requires a non-empty name argument.
pub struct IpInjector {
    resolver: Arc<NameResolver>,
    target: String,
    source: String,
}

impl IpInjector {
    /// Creates an injector mediating between `target` (the address
    /// parameter) and `source` (the name parameter).
    pub fn new(
        resolver: Arc<NameResolver>,
        target: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            target: target.into(),
            source: source.into(),
        }
    }

    /// Produces the address argument for a call.
    ///
    /// Returns the explicit address unchanged when one was supplied;
    /// otherwise resolves the name argument, element-wise for lists with
    /// order preserved. Fails with a missing-parameter error, before any
    /// lookup, when neither side is usable.
    pub async fn resolve_args(&self, ip: Option<IpArg>, name: Option<NameArg>) -> Result<IpArg> {
        if let Some(ip) = ip.filter(|ip| !ip.is_empty()) {
            debug!(target = %self.target, "Address supplied explicitly, skipping lookup");
            return Ok(ip);
        }

        let name = name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| NameIpError::MissingParameter(self.source.clone()))?;

        match name {
            NameArg::One(name) => Ok(IpArg::One(self.resolver.look_up(&name).await?)),
            NameArg::Many(names) => {
                let ips =
                    try_join_all(names.iter().map(|name| self.resolver.look_up(name))).await?;
                Ok(IpArg::Many(ips))
            }
        }
    }

    /// Invokes `f` with the address argument produced by
    /// [`resolve_args`](Self::resolve_args).
    pub async fn call<F, Fut, T>(
        &self,
        ip: Option<IpArg>,
        name: Option<NameArg>,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(IpArg) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let resolved = self.resolve_args(ip, name).await?;
        f(resolved).await
    }
}
