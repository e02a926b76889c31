use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::fmt_payload;
use std::fmt::{Debug, Formatter};

const TYPE_OFFSET: usize = 0;
const CODE_OFFSET: usize = 1;
const CHECKSUM_OFFSET: usize = 2;
const IDENTIFIER_OFFSET: usize = 4;
const SEQUENCE_OFFSET: usize = 6;
const PAYLOAD_OFFSET: usize = 8;

/// An `ICMP` message of either family.
///
/// `ICMPv4` and `ICMPv6` share the first eight bytes: type, code, checksum
/// and a four byte field which echo messages split into identifier and
/// sequence. The type is held as the raw wire value, the family specific
/// meaning is given by [`crate::icmpv4::IcmpType`] and [`crate::icmpv6::IcmpType`].
pub struct IcmpPacket<'a> {
    buf: Buffer<'a>,
}

impl<'a> IcmpPacket<'a> {
    pub fn new(packet: &'a mut [u8]) -> Result<Self> {
        Self::check_size(packet.len())?;
        Ok(Self {
            buf: Buffer::Mutable(packet),
        })
    }

    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        Self::check_size(packet.len())?;
        Ok(Self {
            buf: Buffer::Immutable(packet),
        })
    }

    fn check_size(len: usize) -> Result<()> {
        if len < Self::minimum_packet_size() {
            return Err(Error::InsufficientPacketBuffer(
                String::from("IcmpPacket"),
                Self::minimum_packet_size(),
                len,
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        PAYLOAD_OFFSET
    }

    #[must_use]
    pub fn get_icmp_type(&self) -> u8 {
        self.buf.read(TYPE_OFFSET)
    }

    #[must_use]
    pub fn get_checksum(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(CHECKSUM_OFFSET))
    }

    /// The echo identifier, meaningful for echo requests and replies only.
    #[must_use]
    pub fn get_identifier(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(IDENTIFIER_OFFSET))
    }

    /// The echo sequence, meaningful for echo requests and replies only.
    #[must_use]
    pub fn get_sequence(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(SEQUENCE_OFFSET))
    }

    pub fn set_icmp_type(&mut self, val: u8) {
        *self.buf.write(TYPE_OFFSET) = val;
    }

    pub fn set_icmp_code(&mut self, val: u8) {
        *self.buf.write(CODE_OFFSET) = val;
    }

    pub fn set_checksum(&mut self, val: u16) {
        self.buf.set_bytes(CHECKSUM_OFFSET, val.to_be_bytes());
    }

    pub fn set_identifier(&mut self, val: u16) {
        self.buf.set_bytes(IDENTIFIER_OFFSET, val.to_be_bytes());
    }

    pub fn set_sequence(&mut self, val: u16) {
        self.buf.set_bytes(SEQUENCE_OFFSET, val.to_be_bytes());
    }

    /// Copy `vals` after the header.
    ///
    /// # Panics
    ///
    /// Panics if the packet is too small to hold `vals`.
    pub fn set_payload(&mut self, vals: &[u8]) {
        self.buf.as_slice_mut()[PAYLOAD_OFFSET..PAYLOAD_OFFSET + vals.len()].copy_from_slice(vals);
    }

    #[must_use]
    pub fn packet(&self) -> &[u8] {
        self.buf.as_slice()
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf.as_slice()[PAYLOAD_OFFSET..]
    }
}

impl Debug for IcmpPacket<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IcmpPacket")
            .field("icmp_type", &self.get_icmp_type())
            .field("checksum", &self.get_checksum())
            .field("identifier", &self.get_identifier())
            .field("sequence", &self.get_sequence())
            .field("payload", &fmt_payload(self.payload()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_build_echo() {
        let mut buf = [0xff_u8; 12];
        let mut packet = IcmpPacket::new(&mut buf).unwrap();
        packet.set_icmp_type(8);
        packet.set_icmp_code(0);
        packet.set_checksum(0xf323);
        packet.set_identifier(1234);
        packet.set_sequence(10);
        packet.set_payload(b"ping");
        assert_eq!(&hex!("08 00 f3 23 04 d2 00 0a 70 69 6e 67"), packet.packet());
    }

    #[test]
    fn test_view_echo_reply_v4() {
        let buf = hex!("00 00 c1 2b 30 39 00 01 68 6f 73 74 77 61 74 63 68 20 70 69 6e 67");
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(0, packet.get_icmp_type());
        assert_eq!(0xc12b, packet.get_checksum());
        assert_eq!(12345, packet.get_identifier());
        assert_eq!(1, packet.get_sequence());
        assert_eq!(b"hostwatch ping", packet.payload());
    }

    #[test]
    fn test_view_echo_reply_v6() {
        let buf = hex!("81 00 bd 2c 30 39 00 01 68 6f 73 74 77 61 74 63 68 20 70 69 6e 67");
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(129, packet.get_icmp_type());
        assert_eq!(12345, packet.get_identifier());
        assert_eq!(1, packet.get_sequence());
    }

    #[test]
    fn test_view_header_only() {
        let buf = hex!("03 01 fc fe 00 00 00 00");
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(3, packet.get_icmp_type());
        assert!(packet.payload().is_empty());
    }

    #[test]
    fn test_debug() {
        let buf = hex!("00 00 c1 2b 30 39 00 01 68 6f");
        let packet = IcmpPacket::new_view(&buf).unwrap();
        assert_eq!(
            "IcmpPacket { icmp_type: 0, checksum: 49451, identifier: 12345, sequence: 1, payload: \"68 6f\" }",
            format!("{packet:?}")
        );
    }

    #[test]
    fn test_insufficient_buffer() {
        const SIZE: usize = IcmpPacket::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("IcmpPacket"), SIZE, SIZE - 1),
            IcmpPacket::new_view(&buf).unwrap_err()
        );
        let mut buf = [0_u8; SIZE - 2];
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("IcmpPacket"), SIZE, SIZE - 2),
            IcmpPacket::new(&mut buf).unwrap_err()
        );
    }
}
