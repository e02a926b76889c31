//! Wire formats for the packets used by `hostwatch`.
//!
//! The following packets are supported:
//! - `ICMP` echo request and echo reply, shared by `ICMPv4` and `ICMPv6`
//! - the `ICMPv4` and `ICMPv6` message types
//! - `IPv4` (raw `IPv4` sockets deliver the header ahead of the `ICMP` message)
//!
//! # Endianness
//!
//! The internal representation is held in network byte order (big-endian) and
//! all accessor methods take and return data in host byte order, converting as
//! necessary for the given architecture.
//!
//! # Example
//!
//! Build an `ICMPv4` echo request:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use hostwatch_packet::checksum::icmp_ipv4_checksum;
//! use hostwatch_packet::icmp::IcmpPacket;
//! use hostwatch_packet::icmpv4::IcmpType;
//!
//! let mut buf = [0; IcmpPacket::minimum_packet_size()];
//! let mut icmp = IcmpPacket::new(&mut buf)?;
//! icmp.set_icmp_type(IcmpType::EchoRequest.id());
//! icmp.set_icmp_code(0);
//! icmp.set_identifier(1234);
//! icmp.set_sequence(10);
//! icmp.set_checksum(icmp_ipv4_checksum(icmp.packet()));
//! assert_eq!(icmp.packet(), &hex_literal::hex!("08 00 f3 23 04 d2 00 0a"));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod buffer;

/// Packet errors.
pub mod error;

/// Functions for calculating network checksums.
pub mod checksum;

/// `ICMP` echo messages.
pub mod icmp;

/// `ICMPv4` message types.
pub mod icmpv4;

/// `ICMPv6` message types.
pub mod icmpv6;

/// `IPv4` packets.
pub mod ipv4;

/// The IP packet next layer protocol.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IpProtocol {
    Icmp,
    IcmpV6,
    Other(u8),
}

impl IpProtocol {
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Icmp => 1,
            Self::IcmpV6 => 58,
            Self::Other(id) => id,
        }
    }
}

impl From<u8> for IpProtocol {
    fn from(id: u8) -> Self {
        match id {
            1 => Self::Icmp,
            58 => Self::IcmpV6,
            p => Self::Other(p),
        }
    }
}

/// Format a payload as a hexadecimal string.
#[must_use]
pub fn fmt_payload(bytes: &[u8]) -> String {
    use itertools::Itertools as _;
    format!("{:02x}", bytes.iter().format(" "))
}
