use crate::probe::IcmpMessageType;
use crate::types::{Identifier, Sequence};

/// Echo requests and replies shared by both families.
pub(crate) mod echo;

/// `IPv4` echo requests and replies.
pub(crate) mod ipv4;

/// `IPv6` echo requests and replies.
pub(crate) mod ipv6;

/// Platform specific network code.
mod platform;

/// A network socket.
mod socket;

/// Determine the source address.
pub mod source;

pub use platform::SocketImpl;
pub use socket::Socket;

#[cfg(test)]
pub use socket::{tests::MTX, MockSocket};

/// The `ICMP` message found in a received datagram.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum IcmpReply {
    /// An echo reply and the correlation fields it carries.
    EchoReply {
        identifier: Identifier,
        sequence: Sequence,
    },
    /// Any other `ICMP` message.
    Other(IcmpMessageType),
}
