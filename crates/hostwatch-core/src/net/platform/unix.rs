use crate::error::{IoError, IoOperation, IoResult};
use crate::family::AddrFamily;
use crate::net::socket::Socket;
use itertools::Itertools;
use nix::sys::select::FdSet;
use nix::sys::time::{TimeVal, TimeValLike};
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io;
use std::net::SocketAddr;
use std::os::fd::AsFd;
use std::time::Duration;
use tracing::instrument;

/// A network socket.
pub struct SocketImpl {
    inner: socket2::Socket,
}

impl SocketImpl {
    fn new(domain: Domain, ty: Type, protocol: Protocol) -> IoResult<Self> {
        Ok(Self {
            inner: socket2::Socket::new(domain, ty, Some(protocol))
                .map_err(|err| IoError::Other(err, IoOperation::NewSocket))?,
        })
    }

    fn set_nonblocking(&self, nonblocking: bool) -> IoResult<()> {
        self.inner
            .set_nonblocking(nonblocking)
            .map_err(|err| IoError::Other(err, IoOperation::SetNonBlocking))
    }

    /// Stop the kernel queueing echo requests, our own included, on a raw socket.
    ///
    /// A failure leaves the socket unfiltered.
    #[cfg(target_os = "linux")]
    fn block_echo_requests(&self, family: AddrFamily) {
        let icmp_type = family.echo_request_type();
        let set = match family {
            AddrFamily::Ipv4 => filter::block_icmpv4(&self.inner, icmp_type),
            AddrFamily::Ipv6 => filter::block_icmpv6(&self.inner, icmp_type),
        };
        if let Err(err) = set {
            tracing::debug!(%err, %family, "failed to set ICMP filter");
        }
    }

    #[cfg(not(target_os = "linux"))]
    #[allow(clippy::unused_self)]
    fn block_echo_requests(&self, _family: AddrFamily) {}
}

impl Socket for SocketImpl {
    #[instrument(level = "trace")]
    fn new_icmp_socket_ipv4() -> IoResult<Self> {
        let socket = Self::new(Domain::IPV4, Type::RAW, Protocol::ICMPV4)?;
        socket.set_nonblocking(true)?;
        socket.block_echo_requests(AddrFamily::Ipv4);
        Ok(socket)
    }

    #[instrument(level = "trace")]
    fn new_icmp_socket_ipv6() -> IoResult<Self> {
        let socket = Self::new(Domain::IPV6, Type::RAW, Protocol::ICMPV6)?;
        socket.set_nonblocking(true)?;
        socket.block_echo_requests(AddrFamily::Ipv6);
        Ok(socket)
    }

    #[instrument(level = "trace")]
    fn new_udp_dgram_socket_ipv4() -> IoResult<Self> {
        Self::new(Domain::IPV4, Type::DGRAM, Protocol::UDP)
    }

    #[instrument(level = "trace")]
    fn new_udp_dgram_socket_ipv6() -> IoResult<Self> {
        Self::new(Domain::IPV6, Type::DGRAM, Protocol::UDP)
    }

    #[instrument(skip(self), level = "trace")]
    fn bind(&mut self, address: SocketAddr) -> IoResult<()> {
        self.inner
            .bind(&SockAddr::from(address))
            .map_err(|err| IoError::Bind(err, address))
    }

    #[instrument(skip(self), level = "trace")]
    fn connect(&mut self, address: SocketAddr) -> IoResult<()> {
        self.inner
            .connect(&SockAddr::from(address))
            .map_err(|err| IoError::Connect(err, address))
    }

    #[instrument(skip(self), ret, level = "trace")]
    fn local_addr(&mut self) -> IoResult<Option<SocketAddr>> {
        Ok(self
            .inner
            .local_addr()
            .map_err(|err| IoError::Other(err, IoOperation::LocalAddr))?
            .as_socket())
    }

    #[instrument(skip(self, buf), level = "trace")]
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> IoResult<()> {
        tracing::trace!(buf = format!("{:02x}", buf.iter().format(" ")), ?addr);
        self.inner
            .send_to(buf, &SockAddr::from(addr))
            .map_err(|err| IoError::SendTo(err, addr))?;
        Ok(())
    }

    #[instrument(skip(self), level = "trace")]
    fn is_readable(&mut self, timeout: Duration) -> IoResult<bool> {
        let mut read = FdSet::new();
        read.insert(self.inner.as_fd());
        let millis = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
        let readable = nix::sys::select::select(
            None,
            Some(&mut read),
            None,
            None,
            Some(&mut TimeVal::milliseconds(millis)),
        );
        match readable {
            Ok(readable) => Ok(readable == 1),
            Err(nix::Error::EINTR) => Ok(false),
            Err(err) => Err(IoError::Other(io::Error::from(err), IoOperation::Select)),
        }
    }

    #[instrument(skip(self, buf), level = "trace")]
    fn recv_from(&mut self, buf: &mut [u8]) -> IoResult<(usize, Option<SocketAddr>)> {
        let (bytes_read, addr) = self
            .inner
            .recv_from_into_buf(buf)
            .map_err(|err| IoError::Other(err, IoOperation::RecvFrom))?;
        tracing::trace!(
            buf = format!("{:02x}", buf[..bytes_read].iter().format(" ")),
            bytes_read,
            ?addr
        );
        Ok((bytes_read, addr))
    }
}

/// Receive into an initialised `&mut [u8]`, which `socket2::Socket::recv_from` does not accept.
trait RecvFrom {
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)>;
}

impl RecvFrom for socket2::Socket {
    // Safety: `recv_from` never writes uninitialised bytes into `buf`.
    #![allow(unsafe_code)]
    fn recv_from_into_buf(&self, buf: &mut [u8]) -> io::Result<(usize, Option<SocketAddr>)> {
        let buf = unsafe {
            &mut *(std::ptr::from_mut::<[u8]>(buf) as *mut [std::mem::MaybeUninit<u8>])
        };
        self.recv_from(buf)
            .map(|(size, addr)| (size, addr.as_socket()))
    }
}

/// Kernel side `ICMP` type filters for raw sockets.
///
/// Raw sockets are handed every `ICMP` message of their family, including the
/// echo requests we send to a loopback address. Filtered types are dropped
/// before they are queued on the socket.
#[cfg(target_os = "linux")]
mod filter {
    #![allow(unsafe_code)]
    use std::io;
    use std::os::fd::AsRawFd;

    /// `ICMP_FILTER` from `linux/icmp.h`.
    const ICMP_FILTER: libc::c_int = 1;

    /// `ICMP6_FILTER` from `netinet/icmp6.h`.
    const ICMP6_FILTER: libc::c_int = 1;

    /// Drop `ICMPv4` messages of `icmp_type`.
    pub fn block_icmpv4(socket: &socket2::Socket, icmp_type: u8) -> io::Result<()> {
        setsockopt(socket, libc::SOL_RAW, ICMP_FILTER, &icmpv4_mask(icmp_type))
    }

    /// Drop `ICMPv6` messages of `icmp_type`.
    pub fn block_icmpv6(socket: &socket2::Socket, icmp_type: u8) -> io::Result<()> {
        setsockopt(
            socket,
            libc::IPPROTO_ICMPV6,
            ICMP6_FILTER,
            &icmpv6_mask(icmp_type),
        )
    }

    /// The `ICMPv4` filter is a single word, a set bit drops the type.
    ///
    /// Types from 32 upwards cannot be filtered and yield an empty mask.
    fn icmpv4_mask(icmp_type: u8) -> u32 {
        1_u32.checked_shl(u32::from(icmp_type)).unwrap_or(0)
    }

    /// The `ICMPv6` filter covers all 256 types, a set bit drops the type.
    fn icmpv6_mask(icmp_type: u8) -> [u32; 8] {
        let mut mask = [0_u32; 8];
        mask[usize::from(icmp_type >> 5)] = 1 << (icmp_type & 31);
        mask
    }

    fn setsockopt<T>(
        socket: &socket2::Socket,
        level: libc::c_int,
        name: libc::c_int,
        val: &T,
    ) -> io::Result<()> {
        // Safety: `val` is a live `T` and the length passed is its size.
        let ret = unsafe {
            libc::setsockopt(
                socket.as_raw_fd(),
                level,
                name,
                std::ptr::from_ref(val).cast::<libc::c_void>(),
                std::mem::size_of::<T>() as libc::socklen_t,
            )
        };
        if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use test_case::test_case;

        #[test_case(0, 0x0000_0001)]
        #[test_case(8, 0x0000_0100)]
        #[test_case(31, 0x8000_0000)]
        #[test_case(32, 0)]
        #[test_case(255, 0)]
        fn test_icmpv4_mask(icmp_type: u8, expected: u32) {
            assert_eq!(expected, icmpv4_mask(icmp_type));
        }

        #[test]
        fn test_icmpv6_mask_echo_request() {
            assert_eq!([0, 0, 0, 0, 1, 0, 0, 0], icmpv6_mask(128));
        }

        #[test]
        fn test_icmpv6_mask_last_type() {
            assert_eq!([0, 0, 0, 0, 0, 0, 0, 0x8000_0000], icmpv6_mask(255));
        }

        #[test]
        fn test_setsockopt_on_unsupported_socket() {
            let socket = socket2::Socket::new(
                socket2::Domain::IPV4,
                socket2::Type::DGRAM,
                Some(socket2::Protocol::UDP),
            )
            .unwrap();
            assert!(block_icmpv4(&socket, 8).is_err());
        }
    }
}
