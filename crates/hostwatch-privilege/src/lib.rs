//! Discover and acquire the privilege needed to open raw `ICMP` sockets.
//!
//! [`Privilege::acquire`]:
//!
//! - On Linux we check if `CAP_NET_RAW` is in the permitted set and if so raise it to the effective
//!   set
//! - On other Unix platforms this is a no-op
//!
//! [`Privilege::has_privileges`] (obtained via [`Privilege::discover`]):
//!
//! - On Linux we check if `CAP_NET_RAW` is in the effective set
//! - On other Unix platforms we check that the effective user is root
//!
//! Privileges are never dropped by `hostwatch`, every probe opens a fresh raw
//! socket and so needs the capability for the lifetime of the process.
//!
//! # Example
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! # use hostwatch_privilege::Privilege;
//! let privilege = Privilege::acquire()?;
//! if !privilege.has_privileges() {
//!     println!("raw sockets need CAP_NET_RAW or root");
//! }
//! # Ok(())
//! # }
//! ```
#![cfg(unix)]

/// A privilege error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A privilege error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(target_os = "linux")]
    #[error("caps error: {0}")]
    CapsError(#[from] caps::errors::CapsError),
}

/// Run-time platform privilege information.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Privilege {
    has_privileges: bool,
}

impl Privilege {
    /// Discover the current privileges without changing them.
    pub fn discover() -> Result<Self> {
        Ok(Self::new(Self::check_has_privileges()?))
    }

    const fn new(has_privileges: bool) -> Self {
        Self { has_privileges }
    }

    /// Can we open raw `ICMP` sockets?
    #[must_use]
    pub const fn has_privileges(&self) -> bool {
        self.has_privileges
    }

    #[cfg(target_os = "linux")]
    /// Raise `CAP_NET_RAW` to the effective set if it is permitted.
    pub fn acquire() -> Result<Self> {
        if caps::has_cap(None, caps::CapSet::Permitted, caps::Capability::CAP_NET_RAW)? {
            caps::raise(None, caps::CapSet::Effective, caps::Capability::CAP_NET_RAW)?;
        }
        Self::discover()
    }

    #[cfg(target_os = "linux")]
    fn check_has_privileges() -> Result<bool> {
        Ok(caps::has_cap(
            None,
            caps::CapSet::Effective,
            caps::Capability::CAP_NET_RAW,
        )?)
    }

    #[cfg(not(target_os = "linux"))]
    /// No capabilities to raise here, only discovers.
    pub fn acquire() -> Result<Self> {
        Self::discover()
    }

    #[cfg(not(target_os = "linux"))]
    #[allow(clippy::unnecessary_wraps)]
    fn check_has_privileges() -> Result<bool> {
        Ok(nix::unistd::Uid::effective().is_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert!(Privilege::new(true).has_privileges());
        assert!(!Privilege::new(false).has_privileges());
    }

    #[test]
    fn test_acquire_agrees_with_discover() -> anyhow::Result<()> {
        let acquired = Privilege::acquire()?;
        let discovered = Privilege::discover()?;
        assert_eq!(acquired, discovered);
        Ok(())
    }
}
