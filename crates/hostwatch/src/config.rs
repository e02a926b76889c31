use clap::ValueEnum;
use constants::{DEFAULT_LOG_FILTER, DEFAULT_LOG_FORMAT, DEFAULT_LOG_SPAN_EVENTS};

mod cmd;
pub mod constants;

pub use cmd::Args;

/// The log format.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Display log data in a compact format.
    Compact,
    /// Display log data in a pretty format.
    Pretty,
    /// Display log data in a json format.
    Json,
}

/// How to log event spans.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogSpanEvents {
    /// Do not display event spans.
    Off,
    /// Display enter and exit event spans.
    Active,
    /// Display all event spans.
    Full,
}

/// The action to perform.
#[derive(Debug, Eq, PartialEq)]
pub enum HostwatchAction {
    /// Watch a host.
    Watch(HostwatchConfig),
    /// No host was given, print usage.
    PrintUsage,
}

impl From<Args> for HostwatchAction {
    fn from(args: Args) -> Self {
        match args.hosts.into_iter().next() {
            Some(host) if !host.is_empty() => Self::Watch(HostwatchConfig {
                host,
                verbose: args.verbose,
                log_format: args.log_format.unwrap_or(DEFAULT_LOG_FORMAT),
                log_filter: args
                    .log_filter
                    .unwrap_or_else(|| String::from(DEFAULT_LOG_FILTER)),
                log_span_events: args.log_span_events.unwrap_or(DEFAULT_LOG_SPAN_EVENTS),
            }),
            _ => Self::PrintUsage,
        }
    }
}

/// Fully parsed and validated configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HostwatchConfig {
    pub host: String,
    pub verbose: bool,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub log_span_events: LogSpanEvents,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use test_case::test_case;

    fn parse_action(cmd: &str) -> Result<HostwatchAction, clap::Error> {
        Args::try_parse_from(cmd.split_whitespace()).map(HostwatchAction::from)
    }

    fn cfg(host: &str) -> HostwatchConfig {
        HostwatchConfig {
            host: host.to_string(),
            verbose: false,
            log_format: DEFAULT_LOG_FORMAT,
            log_filter: String::from(DEFAULT_LOG_FILTER),
            log_span_events: DEFAULT_LOG_SPAN_EVENTS,
        }
    }

    #[test_case("hostwatch google.com", "google.com"; "hostname")]
    #[test_case("hostwatch 8.8.8.8", "8.8.8.8"; "ipv4 literal")]
    #[test_case("hostwatch 2001:4860:4860::8888", "2001:4860:4860::8888"; "ipv6 literal")]
    fn test_host(cmd: &str, expected: &str) {
        assert_eq!(
            HostwatchAction::Watch(cfg(expected)),
            parse_action(cmd).unwrap()
        );
    }

    #[test]
    fn test_missing_host_prints_usage() {
        assert_eq!(HostwatchAction::PrintUsage, parse_action("hostwatch").unwrap());
        assert_eq!(
            HostwatchAction::PrintUsage,
            parse_action("hostwatch --verbose").unwrap()
        );
    }

    #[test]
    fn test_extra_hosts_ignored() {
        assert_eq!(
            HostwatchAction::Watch(cfg("google.com")),
            parse_action("hostwatch google.com 8.8.8.8 ::1").unwrap()
        );
    }

    #[test]
    fn test_extra_hosts_after_flags_ignored() {
        assert_eq!(
            HostwatchAction::Watch(HostwatchConfig {
                verbose: true,
                ..cfg("8.8.8.8")
            }),
            parse_action("hostwatch -v 8.8.8.8 google.com").unwrap()
        );
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["hostwatch", "example.com"]).unwrap();
        let action: HostwatchAction = args.into();
        assert_eq!(HostwatchAction::Watch(cfg("example.com")), action);
    }

    #[test_case("hostwatch example.com", LogFormat::Pretty; "default log format")]
    #[test_case("hostwatch example.com --log-format compact", LogFormat::Compact; "compact log format")]
    #[test_case("hostwatch example.com --log-format pretty", LogFormat::Pretty; "pretty log format")]
    #[test_case("hostwatch example.com --log-format json", LogFormat::Json; "json log format")]
    fn test_log_format(cmd: &str, expected: LogFormat) {
        let HostwatchAction::Watch(cfg) = parse_action(cmd).unwrap() else {
            panic!("expected watch action");
        };
        assert_eq!(expected, cfg.log_format);
    }

    #[test_case("hostwatch example.com", LogSpanEvents::Off; "default log span")]
    #[test_case("hostwatch example.com --log-span-events off", LogSpanEvents::Off; "off log span")]
    #[test_case("hostwatch example.com --log-span-events active", LogSpanEvents::Active; "active log span")]
    #[test_case("hostwatch example.com --log-span-events full", LogSpanEvents::Full; "full log span")]
    fn test_log_span(cmd: &str, expected: LogSpanEvents) {
        let HostwatchAction::Watch(cfg) = parse_action(cmd).unwrap() else {
            panic!("expected watch action");
        };
        assert_eq!(expected, cfg.log_span_events);
    }

    #[test_case("hostwatch example.com --log-format foo"; "invalid log format")]
    #[test_case("hostwatch example.com --log-span-events foo"; "invalid log span")]
    #[test_case("hostwatch example.com --unknown"; "unknown flag")]
    fn test_invalid(cmd: &str) {
        assert!(parse_action(cmd).is_err());
    }

    #[test]
    fn test_verbose_and_filter() {
        let expected = HostwatchConfig {
            verbose: true,
            log_filter: String::from("hostwatch_core=trace"),
            ..cfg("example.com")
        };
        assert_eq!(
            HostwatchAction::Watch(expected),
            parse_action("hostwatch example.com -v --log-filter hostwatch_core=trace").unwrap()
        );
    }
}
