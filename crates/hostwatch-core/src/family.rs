use crate::error::{IoResult, Result};
use crate::net::{ipv4, ipv6, IcmpReply, Socket};
use crate::types::{Identifier, Sequence};
use hostwatch_packet::IpProtocol;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The address family of a target.
///
/// Every family dependent decision is made through this type once the target
/// has been resolved.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AddrFamily {
    Ipv4,
    Ipv6,
}

impl AddrFamily {
    /// The family of an address.
    ///
    /// `IPv4`-mapped `IPv6` addresses belong to `IPv4`.
    #[must_use]
    pub const fn from_addr(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(addr) => match addr.to_ipv4_mapped() {
                Some(_) => Self::Ipv4,
                None => Self::Ipv6,
            },
        }
    }

    /// The unspecified address a receive socket is bound to.
    #[must_use]
    pub const fn wildcard_addr(self) -> IpAddr {
        match self {
            Self::Ipv4 => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::Ipv6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        }
    }

    /// The IP protocol carrying `ICMP` for this family.
    #[must_use]
    pub const fn protocol(self) -> IpProtocol {
        match self {
            Self::Ipv4 => IpProtocol::Icmp,
            Self::Ipv6 => IpProtocol::IcmpV6,
        }
    }

    #[must_use]
    pub const fn echo_request_type(self) -> u8 {
        match self {
            Self::Ipv4 => hostwatch_packet::icmpv4::IcmpType::EchoRequest.id(),
            Self::Ipv6 => hostwatch_packet::icmpv6::IcmpType::EchoRequest.id(),
        }
    }

    #[must_use]
    pub const fn echo_reply_type(self) -> u8 {
        match self {
            Self::Ipv4 => hostwatch_packet::icmpv4::IcmpType::EchoReply.id(),
            Self::Ipv6 => hostwatch_packet::icmpv6::IcmpType::EchoReply.id(),
        }
    }

    pub(crate) fn new_icmp_socket<S: Socket>(self) -> IoResult<S> {
        match self {
            Self::Ipv4 => S::new_icmp_socket_ipv4(),
            Self::Ipv6 => S::new_icmp_socket_ipv6(),
        }
    }

    pub(crate) fn new_udp_dgram_socket<S: Socket>(self) -> IoResult<S> {
        match self {
            Self::Ipv4 => S::new_udp_dgram_socket_ipv4(),
            Self::Ipv6 => S::new_udp_dgram_socket_ipv6(),
        }
    }

    /// Serialize an echo request into `buf` and return the wire bytes.
    ///
    /// The source address only takes part in the `ICMPv6` checksum.
    pub(crate) fn make_echo_request<'a>(
        self,
        buf: &'a mut [u8],
        identifier: Identifier,
        sequence: Sequence,
        src_addr: Option<IpAddr>,
        dest_addr: IpAddr,
    ) -> Result<&'a [u8]> {
        match (self, dest_addr) {
            (Self::Ipv6, IpAddr::V6(dest_addr)) => {
                let src_addr = match src_addr {
                    Some(IpAddr::V6(addr)) => addr,
                    _ => Ipv6Addr::UNSPECIFIED,
                };
                ipv6::make_echo_request(buf, identifier, sequence, src_addr, dest_addr)
            }
            _ => ipv4::make_echo_request(buf, identifier, sequence),
        }
    }

    /// Parse a datagram read from a raw socket of this family.
    pub(crate) fn parse_reply(self, buf: &[u8]) -> Result<IcmpReply> {
        match self {
            Self::Ipv4 => ipv4::parse_reply(buf),
            Self::Ipv6 => ipv6::parse_reply(buf),
        }
    }
}

impl Display for AddrFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A resolved host to probe.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Target {
    pub addr: IpAddr,
    pub family: AddrFamily,
}

impl Target {
    /// A target for `addr`, with `IPv4`-mapped `IPv6` addresses normalised to `IPv4`.
    #[must_use]
    pub fn new(addr: IpAddr) -> Self {
        let addr = match addr {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(addr, IpAddr::V4),
            IpAddr::V4(_) => addr,
        };
        Self {
            addr,
            family: AddrFamily::from_addr(addr),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case("1.2.3.4", AddrFamily::Ipv4)]
    #[test_case("::ffff:1.2.3.4", AddrFamily::Ipv4)]
    #[test_case("2001:4860:4860::8888", AddrFamily::Ipv6)]
    #[test_case("::1", AddrFamily::Ipv6)]
    fn test_from_addr(addr: &str, expected: AddrFamily) {
        assert_eq!(expected, AddrFamily::from_addr(IpAddr::from_str(addr).unwrap()));
    }

    #[test]
    fn test_family_properties() {
        assert_eq!(IpAddr::from_str("0.0.0.0").unwrap(), AddrFamily::Ipv4.wildcard_addr());
        assert_eq!(IpAddr::from_str("::").unwrap(), AddrFamily::Ipv6.wildcard_addr());
        assert_eq!(IpProtocol::Icmp, AddrFamily::Ipv4.protocol());
        assert_eq!(IpProtocol::IcmpV6, AddrFamily::Ipv6.protocol());
        assert_eq!(8, AddrFamily::Ipv4.echo_request_type());
        assert_eq!(0, AddrFamily::Ipv4.echo_reply_type());
        assert_eq!(128, AddrFamily::Ipv6.echo_request_type());
        assert_eq!(129, AddrFamily::Ipv6.echo_reply_type());
        assert_eq!("IPv4", AddrFamily::Ipv4.to_string());
        assert_eq!("IPv6", AddrFamily::Ipv6.to_string());
    }

    #[test]
    fn test_target_normalises_mapped_addr() {
        let target = Target::new(IpAddr::from_str("::ffff:8.8.8.8").unwrap());
        assert_eq!(IpAddr::from_str("8.8.8.8").unwrap(), target.addr);
        assert_eq!(AddrFamily::Ipv4, target.family);
        assert_eq!("8.8.8.8", target.to_string());
    }

    #[test]
    fn test_make_echo_request_ipv4_ignores_source() -> anyhow::Result<()> {
        let mut buf = [0_u8; 64];
        let bytes = AddrFamily::Ipv4.make_echo_request(
            &mut buf,
            Identifier(12345),
            Sequence(1),
            Some(IpAddr::from_str("10.0.0.1")?),
            IpAddr::from_str("8.8.8.8")?,
        )?;
        assert_eq!(
            &hex_literal::hex!(
                "08 00 b9 2b 30 39 00 01 68 6f 73 74 77 61 74 63 68 20 70 69 6e 67"
            ),
            bytes
        );
        Ok(())
    }
}
