use crate::config::{LogFormat, LogSpanEvents};
use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  hostwatch google.com
  hostwatch 8.8.8.8
  hostwatch 2001:4860:4860::8888";

/// Wait for a host to respond to ICMP echo
#[derive(Parser, Debug)]
#[command(name = "hostwatch", author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Args {
    /// The hostname or IP address to watch, any further ones are ignored
    #[arg(value_name = "HOST")]
    pub hosts: Vec<String>,

    /// The debug log format [default: pretty]
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// The debug log filter [default: hostwatch=debug]
    #[arg(long)]
    pub log_filter: Option<String>,

    /// How to log event spans [default: off]
    #[arg(long)]
    pub log_span_events: Option<LogSpanEvents>,

    /// Enable verbose debug logging
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}
