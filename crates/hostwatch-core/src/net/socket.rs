use crate::error::IoResult as Result;
use std::net::SocketAddr;
use std::time::Duration;

/// A socket used to probe, or to discover the local address toward, a target.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create a raw `IPv4` socket for sending and receiving `ICMP`.
    fn new_icmp_socket_ipv4() -> Result<Self>;
    /// Create a raw `IPv6` socket for sending and receiving `ICMPv6`.
    fn new_icmp_socket_ipv6() -> Result<Self>;
    /// Create (non-raw) IPv4/UDP socket for local address discovery.
    fn new_udp_dgram_socket_ipv4() -> Result<Self>;
    /// Create (non-raw) IPv6/UDP socket for local address discovery.
    fn new_udp_dgram_socket_ipv6() -> Result<Self>;
    fn bind(&mut self, address: SocketAddr) -> Result<()>;
    fn connect(&mut self, address: SocketAddr) -> Result<()>;
    fn local_addr(&mut self) -> Result<Option<SocketAddr>>;
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> Result<()>;
    /// Returns true if the socket becomes readable before the timeout, false otherwise.
    fn is_readable(&mut self, timeout: Duration) -> Result<bool>;
    fn recv_from(&mut self, buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>)>;
}
