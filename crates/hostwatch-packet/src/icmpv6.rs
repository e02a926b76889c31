/// The type of `ICMPv6` packet (RFC 4443, RFC 4861).
///
/// Raw `ICMPv6` sockets deliver neighbor discovery traffic alongside echo
/// replies, so those types are named here too.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub enum IcmpType {
    DestinationUnreachable,
    PacketTooBig,
    TimeExceeded,
    ParameterProblem,
    EchoRequest,
    EchoReply,
    RouterSolicitation,
    RouterAdvertisement,
    NeighborSolicitation,
    NeighborAdvertisement,
    Other(u8),
}

impl IcmpType {
    #[must_use]
    pub const fn id(&self) -> u8 {
        match self {
            Self::DestinationUnreachable => 1,
            Self::PacketTooBig => 2,
            Self::TimeExceeded => 3,
            Self::ParameterProblem => 4,
            Self::EchoRequest => 128,
            Self::EchoReply => 129,
            Self::RouterSolicitation => 133,
            Self::RouterAdvertisement => 134,
            Self::NeighborSolicitation => 135,
            Self::NeighborAdvertisement => 136,
            Self::Other(id) => *id,
        }
    }
}

impl From<u8> for IcmpType {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::DestinationUnreachable,
            2 => Self::PacketTooBig,
            3 => Self::TimeExceeded,
            4 => Self::ParameterProblem,
            128 => Self::EchoRequest,
            129 => Self::EchoReply,
            133 => Self::RouterSolicitation,
            134 => Self::RouterAdvertisement,
            135 => Self::NeighborSolicitation,
            136 => Self::NeighborAdvertisement,
            id => Self::Other(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(IcmpType::DestinationUnreachable, 1)]
    #[test_case(IcmpType::PacketTooBig, 2)]
    #[test_case(IcmpType::TimeExceeded, 3)]
    #[test_case(IcmpType::ParameterProblem, 4)]
    #[test_case(IcmpType::EchoRequest, 128)]
    #[test_case(IcmpType::EchoReply, 129)]
    #[test_case(IcmpType::RouterSolicitation, 133)]
    #[test_case(IcmpType::RouterAdvertisement, 134)]
    #[test_case(IcmpType::NeighborSolicitation, 135)]
    #[test_case(IcmpType::NeighborAdvertisement, 136)]
    #[test_case(IcmpType::Other(200), 200)]
    fn test_icmp_type(icmp_type: IcmpType, id: u8) {
        assert_eq!(id, icmp_type.id());
        assert_eq!(icmp_type, IcmpType::from(id));
    }
}
