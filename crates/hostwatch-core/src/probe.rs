use crate::error::Error;
use crate::family::AddrFamily;
use crate::types::{Identifier, Sequence};
use hostwatch_packet::{icmpv4, icmpv6};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::time::Duration;

/// The outcome of a single probe attempt.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// A correlated echo reply was received.
    Success {
        peer: IpAddr,
        sequence: Sequence,
        rtt: Duration,
    },
    /// No reply arrived before the read deadline, or the read failed.
    Timeout,
    /// The socket could not be created, bound or written to.
    TransportError { cause: Error },
    /// An `ICMP` message other than an echo reply was received.
    ProtocolMismatch {
        observed_type: IcmpMessageType,
        peer: IpAddr,
    },
    /// An echo reply for another request was received.
    CorrelationMismatch {
        observed_identifier: Identifier,
        observed_sequence: Sequence,
        peer: IpAddr,
    },
    /// The received datagram could not be parsed.
    MalformedReply { peer: IpAddr },
    /// The probe was cancelled before it completed.
    Cancelled,
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// The type of an `ICMP` message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IcmpMessageType {
    V4(icmpv4::IcmpType),
    V6(icmpv6::IcmpType),
}

impl IcmpMessageType {
    /// The message type for a raw wire `icmp_type` of `family`.
    #[must_use]
    pub fn new(family: AddrFamily, icmp_type: u8) -> Self {
        match family {
            AddrFamily::Ipv4 => Self::V4(icmpv4::IcmpType::from(icmp_type)),
            AddrFamily::Ipv6 => Self::V6(icmpv6::IcmpType::from(icmp_type)),
        }
    }
}

impl Display for IcmpMessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V4(icmp_type) => match icmp_type {
                icmpv4::IcmpType::EchoReply => write!(f, "echo reply"),
                icmpv4::IcmpType::DestinationUnreachable => write!(f, "destination unreachable"),
                icmpv4::IcmpType::SourceQuench => write!(f, "source quench"),
                icmpv4::IcmpType::Redirect => write!(f, "redirect"),
                icmpv4::IcmpType::EchoRequest => write!(f, "echo"),
                icmpv4::IcmpType::TimeExceeded => write!(f, "time exceeded"),
                icmpv4::IcmpType::ParameterProblem => write!(f, "parameter problem"),
                icmpv4::IcmpType::Other(id) => write!(f, "type {id}"),
            },
            Self::V6(icmp_type) => match icmp_type {
                icmpv6::IcmpType::DestinationUnreachable => write!(f, "destination unreachable"),
                icmpv6::IcmpType::PacketTooBig => write!(f, "packet too big"),
                icmpv6::IcmpType::TimeExceeded => write!(f, "time exceeded"),
                icmpv6::IcmpType::ParameterProblem => write!(f, "parameter problem"),
                icmpv6::IcmpType::EchoRequest => write!(f, "echo request"),
                icmpv6::IcmpType::EchoReply => write!(f, "echo reply"),
                icmpv6::IcmpType::RouterSolicitation => write!(f, "router solicitation"),
                icmpv6::IcmpType::RouterAdvertisement => write!(f, "router advertisement"),
                icmpv6::IcmpType::NeighborSolicitation => write!(f, "neighbor solicitation"),
                icmpv6::IcmpType::NeighborAdvertisement => write!(f, "neighbor advertisement"),
                icmpv6::IcmpType::Other(id) => write!(f, "type {id}"),
            },
        }
    }
}
