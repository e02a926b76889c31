use crate::constants::ECHO_PAYLOAD;
use crate::error::Result;
use crate::family::AddrFamily;
use crate::net::IcmpReply;
use crate::probe::IcmpMessageType;
use crate::types::{Identifier, Sequence};
use hostwatch_packet::error::Error as PacketError;
use hostwatch_packet::icmp::IcmpPacket;

/// Serialize an echo request of `family` carrying the fixed payload.
///
/// The checksum is computed over the finished message by `checksum`.
pub fn make_echo_request(
    family: AddrFamily,
    icmp_buf: &mut [u8],
    identifier: Identifier,
    sequence: Sequence,
    checksum: impl FnOnce(&[u8]) -> u16,
) -> Result<&[u8]> {
    let packet_size = IcmpPacket::minimum_packet_size() + ECHO_PAYLOAD.len();
    let buf_len = icmp_buf.len();
    let buf = icmp_buf.get_mut(..packet_size).ok_or_else(|| {
        PacketError::InsufficientPacketBuffer(String::from("IcmpPacket"), packet_size, buf_len)
    })?;
    let mut icmp = IcmpPacket::new(buf)?;
    icmp.set_icmp_type(family.echo_request_type());
    icmp.set_icmp_code(0);
    icmp.set_identifier(identifier.0);
    icmp.set_sequence(sequence.0);
    icmp.set_payload(ECHO_PAYLOAD);
    icmp.set_checksum(checksum(icmp.packet()));
    Ok(&icmp_buf[..packet_size])
}

/// Classify a bare `ICMP` message of `family`.
pub fn parse_icmp(family: AddrFamily, buf: &[u8]) -> Result<IcmpReply> {
    let icmp = IcmpPacket::new_view(buf)?;
    let icmp_type = icmp.get_icmp_type();
    if icmp_type == family.echo_reply_type() {
        Ok(IcmpReply::EchoReply {
            identifier: Identifier(icmp.get_identifier()),
            sequence: Sequence(icmp.get_sequence()),
        })
    } else {
        Ok(IcmpReply::Other(IcmpMessageType::new(family, icmp_type)))
    }
}
