//! hostwatch - wait for a host to respond to ICMP echo.
//!
//! This crate provides the resolver, prober and watch loop used by the
//! `hostwatch` binary.
//!
//! A host is resolved once to a [`Target`], then probed with one `ICMP` echo
//! request per attempt until a correlated echo reply arrives. Every attempt
//! opens, uses and closes its own raw socket.
//!
//! # Example
//!
//! Resolve a host and watch it until it responds, printing every attempt:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use hostwatch_core::{
//!     Identifier, ProbeOutcome, Prober, Report, Resolver, Sequence, SocketImpl, SystemLookup,
//!     Target, Watcher,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! struct Print;
//!
//! impl Report for Print {
//!     fn report(&mut self, _target: &Target, sequence: Sequence, outcome: &ProbeOutcome) {
//!         println!("{sequence}: {outcome:?}");
//!     }
//! }
//!
//! let resolved = Resolver::new(SystemLookup).resolve("1.1.1.1")?;
//! let prober = Prober::<SocketImpl>::for_target(Identifier(1234), resolved.target);
//! let result = Watcher::new(prober).watch(resolved.target, &mut Print, &CancellationToken::new());
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
mod family;
mod probe;
mod prober;
mod resolver;
mod types;
mod watcher;

/// Sockets and wire handling.
pub mod net;

pub use constants::{ECHO_PAYLOAD, POLL_INTERVAL, PROBE_INTERVAL, READ_TIMEOUT};
pub use error::{Error, IoError, IoOperation, IoResult, Result};
pub use family::{AddrFamily, Target};
pub use net::{Socket, SocketImpl};
pub use probe::{IcmpMessageType, ProbeOutcome};
pub use prober::{EchoProbe, Prober};
pub use resolver::{Lookup, Resolved, Resolver, SystemLookup};
pub use types::{Identifier, Sequence};
pub use watcher::{Report, WatchResult, Watcher};
