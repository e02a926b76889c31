use crate::error::{Error, Result};
use crate::family::Target;
use crate::net::socket::Socket;
use std::net::{IpAddr, SocketAddr};
use tracing::instrument;

/// The port used for local address discovery.
const DISCOVERY_PORT: u16 = 80;

/// Discover the source address.
pub struct SourceAddr;

impl SourceAddr {
    /// Discover the local `IpAddr` the kernel would use to reach `target`.
    ///
    /// Connecting a UDP socket only selects a route, no packets are transmitted.
    #[instrument(ret, level = "trace")]
    pub fn discover<S: Socket>(target: Target) -> Result<IpAddr> {
        let mut socket = target.family.new_udp_dgram_socket::<S>()?;
        socket.connect(SocketAddr::new(target.addr, DISCOVERY_PORT))?;
        Ok(socket.local_addr()?.ok_or(Error::MissingAddr)?.ip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IoError, IoOperation};
    use crate::net::socket::MockSocket;
    use crate::net::MTX;
    use mockall::predicate;
    use std::str::FromStr;

    #[test]
    fn test_discover_ipv6() -> anyhow::Result<()> {
        let _m = MTX.lock();

        let target = Target::new(IpAddr::from_str("2a00:1450:4009:815::200e")?);
        let expected_connect = SocketAddr::new(target.addr, DISCOVERY_PORT);
        let expected_src = SocketAddr::from_str("[fd7a:115c:a1e0:ab12:4843:cd96:6263:82a]:51000")?;

        let ctx = MockSocket::new_udp_dgram_socket_ipv6_context();
        ctx.expect().times(1).returning(move || {
            let mut mocket = MockSocket::new();
            mocket
                .expect_connect()
                .with(predicate::eq(expected_connect))
                .times(1)
                .returning(|_| Ok(()));
            mocket
                .expect_local_addr()
                .times(1)
                .returning(move || Ok(Some(expected_src)));
            Ok(mocket)
        });

        let src_addr = SourceAddr::discover::<MockSocket>(target)?;
        assert_eq!(expected_src.ip(), src_addr);
        Ok(())
    }

    #[test]
    fn test_discover_ipv4() -> anyhow::Result<()> {
        let _m = MTX.lock();

        let target = Target::new(IpAddr::from_str("8.8.8.8")?);
        let ctx = MockSocket::new_udp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket.expect_connect().returning(|_| Ok(()));
            mocket
                .expect_local_addr()
                .returning(|| Ok(Some(SocketAddr::from_str("192.168.1.10:40000").unwrap())));
            Ok(mocket)
        });

        let src_addr = SourceAddr::discover::<MockSocket>(target)?;
        assert_eq!(IpAddr::from_str("192.168.1.10")?, src_addr);
        Ok(())
    }

    #[test]
    fn test_discover_missing_addr() -> anyhow::Result<()> {
        let _m = MTX.lock();

        let target = Target::new(IpAddr::from_str("8.8.8.8")?);
        let ctx = MockSocket::new_udp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket.expect_connect().returning(|_| Ok(()));
            mocket.expect_local_addr().returning(|| Ok(None));
            Ok(mocket)
        });

        let err = SourceAddr::discover::<MockSocket>(target).unwrap_err();
        assert!(matches!(err, Error::MissingAddr));
        Ok(())
    }

    #[test]
    fn test_discover_socket_error() -> anyhow::Result<()> {
        let _m = MTX.lock();

        let target = Target::new(IpAddr::from_str("2001:4860:4860::8888")?);
        let ctx = MockSocket::new_udp_dgram_socket_ipv6_context();
        ctx.expect().times(1).returning(|| {
            Err(IoError::Other(
                std::io::Error::from(std::io::ErrorKind::AddrNotAvailable),
                IoOperation::NewSocket,
            ))
        });

        let err = SourceAddr::discover::<MockSocket>(target).unwrap_err();
        assert!(matches!(
            err,
            Error::IoError(IoError::Other(_, IoOperation::NewSocket))
        ));
        Ok(())
    }
}
