use crate::config::{LogFormat, LogSpanEvents};

/// The default value for `log-format`.
pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Pretty;

/// The default value for `log-span-events`.
pub const DEFAULT_LOG_SPAN_EVENTS: LogSpanEvents = LogSpanEvents::Off;

/// The default value for `log-filter`.
pub const DEFAULT_LOG_FILTER: &str = "hostwatch=debug";

/// Exit code when the watch is interrupted with Ctrl+C.
pub const EXIT_CODE_INTERRUPTED: u8 = 130;
