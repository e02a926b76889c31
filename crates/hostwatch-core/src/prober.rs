use crate::constants::{MAX_PACKET_SIZE, POLL_INTERVAL, READ_TIMEOUT};
use crate::error::{Error, Result};
use crate::family::{AddrFamily, Target};
use crate::net::source::SourceAddr;
use crate::net::{IcmpReply, Socket};
use crate::probe::ProbeOutcome;
use crate::types::{Identifier, Sequence};
use std::marker::PhantomData;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Send one echo request and classify what comes back.
#[cfg_attr(test, mockall::automock)]
pub trait EchoProbe {
    /// Run one bounded request/response cycle.
    ///
    /// Never fails, every problem is expressed as a [`ProbeOutcome`].
    fn probe(
        &mut self,
        target: Target,
        sequence: Sequence,
        cancel: &CancellationToken,
    ) -> ProbeOutcome;
}

/// An [`EchoProbe`] over raw `ICMP` sockets.
///
/// Each call opens its own socket of type `S` and drops it before returning.
#[derive(Debug)]
pub struct Prober<S> {
    identifier: Identifier,
    src_addr: Option<IpAddr>,
    read_timeout: Duration,
    socket: PhantomData<S>,
}

impl<S: Socket> Prober<S> {
    #[must_use]
    pub fn new(identifier: Identifier, src_addr: Option<IpAddr>) -> Self {
        Self {
            identifier,
            src_addr,
            read_timeout: READ_TIMEOUT,
            socket: PhantomData,
        }
    }

    /// Create a prober for `target`, discovering the local source address for `IPv6`.
    ///
    /// Discovery failure is not fatal, the `ICMPv6` checksum is then computed
    /// over the unspecified address and left for the kernel to fix.
    #[must_use]
    pub fn for_target(identifier: Identifier, target: Target) -> Self {
        let src_addr = match target.family {
            AddrFamily::Ipv4 => None,
            AddrFamily::Ipv6 => match SourceAddr::discover::<S>(target) {
                Ok(addr) => Some(addr),
                Err(err) => {
                    tracing::debug!(%err, "failed to discover source address");
                    None
                }
            },
        };
        Self::new(identifier, src_addr)
    }

    /// Open and bind a socket, then send the echo request.
    ///
    /// Returns the socket and the instant immediately before the write.
    fn transmit(&self, target: Target, sequence: Sequence) -> Result<(S, Instant)> {
        let mut socket = target.family.new_icmp_socket::<S>()?;
        socket.bind(SocketAddr::new(target.family.wildcard_addr(), 0))?;
        let mut buf = [0_u8; MAX_PACKET_SIZE];
        let request = target.family.make_echo_request(
            &mut buf,
            self.identifier,
            sequence,
            self.src_addr,
            target.addr,
        )?;
        let start = Instant::now();
        socket.send_to(request, SocketAddr::new(target.addr, 0))?;
        Ok((socket, start))
    }

    /// Wait for a datagram until `deadline` and read it into `buf`.
    ///
    /// Returns `None` if cancelled while waiting.
    fn receive(
        socket: &mut S,
        buf: &mut [u8],
        deadline: Instant,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Option<(usize, IpAddr)>> {
        loop {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::ReadTimeout(timeout));
            }
            if socket.is_readable(remaining.min(POLL_INTERVAL))? {
                let (bytes_read, addr) = socket.recv_from(buf)?;
                let peer = addr.ok_or(Error::MissingAddr)?.ip();
                return Ok(Some((bytes_read, peer)));
            }
        }
    }

    fn classify(
        &self,
        family: AddrFamily,
        packet: &[u8],
        peer: IpAddr,
        sequence: Sequence,
        rtt: Duration,
    ) -> ProbeOutcome {
        match family.parse_reply(packet) {
            Ok(IcmpReply::EchoReply {
                identifier,
                sequence: observed,
            }) if identifier == self.identifier && observed == sequence => ProbeOutcome::Success {
                peer,
                sequence,
                rtt,
            },
            Ok(IcmpReply::EchoReply {
                identifier,
                sequence: observed,
            }) => ProbeOutcome::CorrelationMismatch {
                observed_identifier: identifier,
                observed_sequence: observed,
                peer,
            },
            Ok(IcmpReply::Other(observed_type)) => ProbeOutcome::ProtocolMismatch {
                observed_type,
                peer,
            },
            Err(err) => {
                tracing::debug!(%err, %peer, "failed to parse reply");
                ProbeOutcome::MalformedReply { peer }
            }
        }
    }
}

impl<S: Socket> EchoProbe for Prober<S> {
    #[instrument(skip(self, cancel), level = "trace")]
    fn probe(
        &mut self,
        target: Target,
        sequence: Sequence,
        cancel: &CancellationToken,
    ) -> ProbeOutcome {
        if cancel.is_cancelled() {
            return ProbeOutcome::Cancelled;
        }
        let (mut socket, start) = match self.transmit(target, sequence) {
            Ok(sent) => sent,
            Err(cause) => return ProbeOutcome::TransportError { cause },
        };
        let mut buf = [0_u8; MAX_PACKET_SIZE];
        let deadline = start + self.read_timeout;
        let (bytes_read, peer) =
            match Self::receive(&mut socket, &mut buf, deadline, self.read_timeout, cancel) {
                Ok(Some(received)) => received,
                Ok(None) => return ProbeOutcome::Cancelled,
                Err(err) => {
                    tracing::debug!(%err, %sequence, "no reply, reporting timeout");
                    return ProbeOutcome::Timeout;
                }
            };
        let rtt = start.elapsed();
        self.classify(target.family, &buf[..bytes_read], peer, sequence, rtt)
    }
}
