use crate::family::AddrFamily;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// A hostwatch error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A hostwatch error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("lookup of {0} failed: {1}")]
    LookupFailed(String, io::Error),
    #[error("no {1} address found for host {0}")]
    NoAddress(String, AddrFamily),
    /// The host could not be resolved in any family, holding the last failure.
    #[error("failed to resolve {0}: {1}")]
    Resolution(String, Box<Error>),
    #[error("unexpected IP protocol {0}")]
    UnexpectedProtocol(u8),
    #[error("invalid packet: {0}")]
    PacketError(#[from] hostwatch_packet::error::Error),
    #[error("IO error: {0}")]
    IoError(#[from] IoError),
    #[error("no reply within {0:?}")]
    ReadTimeout(Duration),
    #[error("missing address from socket call")]
    MissingAddr,
}

/// Custom IO error result.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Custom IO error.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Bind error for {1}: {0}")]
    Bind(io::Error, SocketAddr),
    #[error("Connect error for {1}: {0}")]
    Connect(io::Error, SocketAddr),
    #[error("Sendto error for {1}: {0}")]
    SendTo(io::Error, SocketAddr),
    #[error("Failed to {1}: {0}")]
    Other(io::Error, IoOperation),
}

/// Io operation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IoOperation {
    NewSocket,
    SetNonBlocking,
    Select,
    RecvFrom,
    LocalAddr,
}

impl Display for IoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewSocket => write!(f, "create new socket"),
            Self::SetNonBlocking => write!(f, "set non-blocking"),
            Self::Select => write!(f, "select"),
            Self::RecvFrom => write!(f, "recv from"),
            Self::LocalAddr => write!(f, "local addr"),
        }
    }
}
