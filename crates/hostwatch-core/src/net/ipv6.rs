use crate::error::Result;
use crate::family::AddrFamily;
use crate::net::{echo, IcmpReply};
use crate::types::{Identifier, Sequence};
use hostwatch_packet::checksum::icmp_ipv6_checksum;
use std::net::Ipv6Addr;

/// Serialize an `ICMPv6` echo request carrying the fixed payload.
///
/// The kernel rewrites the checksum of raw `ICMPv6` sockets, the one computed
/// here is only exact when `src_addr` is the address the kernel picks.
pub fn make_echo_request(
    icmp_buf: &mut [u8],
    identifier: Identifier,
    sequence: Sequence,
    src_addr: Ipv6Addr,
    dest_addr: Ipv6Addr,
) -> Result<&[u8]> {
    echo::make_echo_request(AddrFamily::Ipv6, icmp_buf, identifier, sequence, |icmp| {
        icmp_ipv6_checksum(icmp, src_addr, dest_addr)
    })
}

/// Parse a datagram read from a raw `ICMPv6` socket.
///
/// Raw `ICMPv6` sockets deliver the bare `ICMPv6` message.
pub fn parse_reply(buf: &[u8]) -> Result<IcmpReply> {
    echo::parse_icmp(AddrFamily::Ipv6, buf)
}
