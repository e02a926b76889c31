use std::time::Duration;

/// How long to wait for a reply after sending a request.
pub const READ_TIMEOUT: Duration = Duration::from_secs(3);

/// The pause between two consecutive attempts.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// The longest single wait before the cancellation token is checked again.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The payload carried by every echo request.
pub const ECHO_PAYLOAD: &[u8] = b"hostwatch ping";

/// The size of the buffers used to build requests and receive replies.
pub const MAX_PACKET_SIZE: usize = 1500;
