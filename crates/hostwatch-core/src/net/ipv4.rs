use crate::error::{Error, Result};
use crate::family::AddrFamily;
use crate::net::{echo, IcmpReply};
use crate::types::{Identifier, Sequence};
use hostwatch_packet::checksum::icmp_ipv4_checksum;
use hostwatch_packet::ipv4::Ipv4Packet;

/// Serialize an `ICMPv4` echo request carrying the fixed payload.
pub fn make_echo_request(
    icmp_buf: &mut [u8],
    identifier: Identifier,
    sequence: Sequence,
) -> Result<&[u8]> {
    echo::make_echo_request(
        AddrFamily::Ipv4,
        icmp_buf,
        identifier,
        sequence,
        icmp_ipv4_checksum,
    )
}

/// Parse a datagram read from a raw `ICMPv4` socket.
///
/// The kernel delivers the `IPv4` header ahead of the `ICMP` message on raw
/// sockets, so it is stripped first. A datagram carrying anything but `ICMP`
/// is rejected.
pub fn parse_reply(buf: &[u8]) -> Result<IcmpReply> {
    let ipv4 = Ipv4Packet::new_view(buf)?;
    let protocol = ipv4.get_protocol();
    if protocol != AddrFamily::Ipv4.protocol() {
        return Err(Error::UnexpectedProtocol(protocol.id()));
    }
    echo::parse_icmp(AddrFamily::Ipv4, ipv4.payload())
}
