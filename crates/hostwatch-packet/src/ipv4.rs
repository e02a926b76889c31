use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::{fmt_payload, IpProtocol};
use std::fmt::{Debug, Formatter};

const IHL_OFFSET: usize = 0;
const PROTOCOL_OFFSET: usize = 9;

/// A read-only view of an `IPv4` packet.
///
/// Only the fields needed to locate the carried `ICMP` message are exposed.
pub struct Ipv4Packet<'a> {
    buf: Buffer<'a>,
}

impl<'a> Ipv4Packet<'a> {
    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self {
                buf: Buffer::Immutable(packet),
            })
        } else {
            Err(Error::InsufficientPacketBuffer(
                String::from("Ipv4Packet"),
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        20
    }

    /// The header length in 32-bit words.
    #[must_use]
    pub fn get_header_length(&self) -> u8 {
        self.buf.read(IHL_OFFSET) & 0xf
    }

    #[must_use]
    pub fn get_protocol(&self) -> IpProtocol {
        IpProtocol::from(self.buf.read(PROTOCOL_OFFSET))
    }

    /// The bytes following the header and its options.
    ///
    /// Empty if the header length claims more bytes than the buffer holds.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        let start = std::cmp::min(self.header_bytes(), self.buf.as_slice().len());
        &self.buf.as_slice()[start..]
    }

    fn header_bytes(&self) -> usize {
        std::cmp::max(
            usize::from(self.get_header_length()) * 4,
            Self::minimum_packet_size(),
        )
    }
}

impl Debug for Ipv4Packet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ipv4Packet")
            .field("header_length", &self.get_header_length())
            .field("protocol", &self.get_protocol())
            .field("payload", &fmt_payload(self.payload()))
            .finish()
    }
}
