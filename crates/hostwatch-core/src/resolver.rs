use crate::error::{Error, Result};
use crate::family::{AddrFamily, Target};
use std::net::IpAddr;
use std::str::FromStr;
use tracing::instrument;

/// A family scoped address lookup.
#[cfg_attr(test, mockall::automock)]
pub trait Lookup {
    /// Lookup the first address of `family` for `host`.
    fn lookup(&self, host: &str, family: AddrFamily) -> Result<IpAddr>;
}

/// A [`Lookup`] using the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl Lookup for SystemLookup {
    #[instrument(level = "trace")]
    fn lookup(&self, host: &str, family: AddrFamily) -> Result<IpAddr> {
        dns_lookup::lookup_host(host)
            .map_err(|err| Error::LookupFailed(host.to_string(), err))?
            .into_iter()
            .find(|addr| AddrFamily::from_addr(*addr) == family)
            .ok_or_else(|| Error::NoAddress(host.to_string(), family))
    }
}

/// The result of resolving a host.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Resolved {
    pub target: Target,
    /// Whether the host was given as a name rather than an address literal.
    pub was_hostname: bool,
}

/// Resolve a host to a single [`Target`].
#[derive(Debug, Clone)]
pub struct Resolver<L> {
    lookup: L,
}

impl<L: Lookup> Resolver<L> {
    pub const fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Resolve `host`, an address literal or a hostname.
    ///
    /// Hostnames are looked up as `IPv4` first and then as `IPv6`.
    pub fn resolve(&self, host: &str) -> Result<Resolved> {
        let resolved = if let Ok(addr) = IpAddr::from_str(host) {
            let literal = Target::new(addr);
            self.lookup
                .lookup(&literal.addr.to_string(), literal.family)
                .map(|addr| Resolved {
                    target: Target::new(addr),
                    was_hostname: false,
                })
        } else {
            self.lookup_hostname(host).map(|addr| Resolved {
                target: Target::new(addr),
                was_hostname: true,
            })
        };
        let resolved = resolved.map_err(|err| Error::Resolution(host.to_string(), Box::new(err)))?;
        tracing::debug!(host, target = %resolved.target, family = %resolved.target.family, "resolved");
        Ok(resolved)
    }

    fn lookup_hostname(&self, host: &str) -> Result<IpAddr> {
        match self.lookup.lookup(host, AddrFamily::Ipv4) {
            Ok(addr) => Ok(addr),
            Err(err) => {
                tracing::debug!(host, %err, "no IPv4 address, trying IPv6");
                self.lookup.lookup(host, AddrFamily::Ipv6)
            }
        }
    }
}
