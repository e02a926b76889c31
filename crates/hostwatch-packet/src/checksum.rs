//! Internet checksums for `ICMPv4` (RFC 792) and `ICMPv6` (RFC 4443).
//!
//! The checksum word of the message (word 1) is skipped while summing, so a
//! message may be passed in with a stale or zero checksum in place.

use crate::IpProtocol;
use std::net::Ipv6Addr;

/// The index of the 16-bit checksum word within an `ICMP` header.
const ICMP_CHECKSUM_WORD: usize = 1;

/// Calculate the checksum for an `ICMPv4` message.
#[must_use]
pub fn icmp_ipv4_checksum(data: &[u8]) -> u16 {
    if data.is_empty() {
        return 0;
    }
    finalize_checksum(sum_be_words(data, ICMP_CHECKSUM_WORD))
}

/// Calculate the checksum for an `ICMPv6` message.
///
/// Unlike `ICMPv4` the sum covers an `IPv6` pseudo-header made of the source and
/// destination addresses, the upper-layer length and the next header value.
#[must_use]
pub fn icmp_ipv6_checksum(data: &[u8], src_addr: Ipv6Addr, dest_addr: Ipv6Addr) -> u16 {
    let mut sum = 0u32;
    sum += ipv6_word_sum(src_addr);
    sum += ipv6_word_sum(dest_addr);
    sum += u32::from(IpProtocol::IcmpV6.id());
    sum += data.len() as u32;
    sum += sum_be_words(data, ICMP_CHECKSUM_WORD);
    finalize_checksum(sum)
}

fn ipv6_word_sum(ip: Ipv6Addr) -> u32 {
    ip.segments().iter().map(|x| u32::from(*x)).sum()
}

fn sum_be_words(data: &[u8], ignore_word: usize) -> u32 {
    let mut chunks = data.chunks_exact(2);
    let mut sum = chunks
        .by_ref()
        .enumerate()
        .filter(|(i, _)| *i != ignore_word)
        .map(|(_, word)| u32::from(u16::from_be_bytes([word[0], word[1]])))
        .sum::<u32>();
    if let [last] = chunks.remainder() {
        if data.len() / 2 != ignore_word {
            sum += u32::from(*last) << 8;
        }
    }
    sum
}

const fn finalize_checksum(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    !sum as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use std::str::FromStr;

    #[test]
    fn test_empty_icmp_ipv4_checksum() {
        assert_eq!(0, icmp_ipv4_checksum(&[]));
    }

    #[test]
    fn test_icmp_ipv4_checksum() {
        let bytes = hex!("08 00 00 00 04 d2 00 0a");
        assert_eq!(0xf323, icmp_ipv4_checksum(&bytes));
    }

    #[test]
    fn test_icmp_ipv4_checksum_ignores_existing_checksum() {
        let bytes = hex!("08 00 ff ff 04 d2 00 0a");
        assert_eq!(0xf323, icmp_ipv4_checksum(&bytes));
    }

    #[test]
    fn test_icmp_ipv4_checksum_with_payload() {
        let bytes = hex!("08 00 00 00 30 39 00 01 68 6f 73 74 77 61 74 63 68 20 70 69 6e 67");
        assert_eq!(0xb92b, icmp_ipv4_checksum(&bytes));
    }

    #[test]
    fn test_icmp_ipv4_checksum_odd_length() {
        assert_eq!(0x4cff, icmp_ipv4_checksum(&[0x08, 0x00, 0x00, 0x00, 0xab]));
    }

    #[test]
    fn test_icmp_ipv6_checksum() {
        let src_addr = Ipv6Addr::from_str("fd7a:115c:a1e0:ab12:4843:cd96:6263:82a").unwrap();
        let dest_addr = Ipv6Addr::from_str("2a00:1450:4009:815::200e").unwrap();
        let bytes = hex!("80 00 00 00 04 d2 82 9a");
        assert_eq!(0x75a2, icmp_ipv6_checksum(&bytes, src_addr, dest_addr));
    }

    #[test]
    fn test_icmp_ipv6_checksum_unspecified_source() {
        let dest_addr = Ipv6Addr::from_str("2a00:1450:4009:815::200e").unwrap();
        let bytes = hex!("80 00 00 00 30 39 00 01 68 6f 73 74 77 61 74 63 68 20 70 69 6e 67");
        assert_eq!(
            0x9a5e,
            icmp_ipv6_checksum(&bytes, Ipv6Addr::UNSPECIFIED, dest_addr)
        );
    }
}
