use crate::config::constants::EXIT_CODE_INTERRUPTED;
use crate::config::{HostwatchConfig, LogFormat, LogSpanEvents};
use crate::report::ConsoleReport;
use hostwatch_core::{
    Error, Identifier, Prober, Resolved, Resolver, SocketImpl, SystemLookup, WatchResult, Watcher,
};
use hostwatch_privilege::Privilege;
use std::io;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::format::FmtSpan;

/// Run hostwatch until the host responds or the user interrupts.
pub async fn run_hostwatch(cfg: HostwatchConfig, pid: u16) -> anyhow::Result<ExitCode> {
    configure_logging(&cfg);
    let privilege = Privilege::acquire()?;
    if !privilege.has_privileges() {
        tracing::warn!("CAP_NET_RAW is not available, raw ICMP sockets will likely fail");
    }
    let host = cfg.host;
    println!("Watching host: {host}");
    let resolved = match resolve(host.clone()).await? {
        Ok(resolved) => resolved,
        Err(err) => {
            let cause = match &err {
                Error::Resolution(_, cause) => cause.as_ref(),
                other => other,
            };
            println!("Error resolving address '{host}': {cause}");
            return Ok(ExitCode::FAILURE);
        }
    };
    if resolved.was_hostname {
        println!(
            "Resolved to: {} ({})",
            resolved.target, resolved.target.family
        );
    }
    println!("\nPinging until host responds... (Press Ctrl+C to stop)");
    let token = CancellationToken::new();
    let signal = tokio::spawn(cancel_on_interrupt(token.clone()));
    let result = watch(resolved, Identifier(pid), token).await?;
    signal.abort();
    Ok(match result {
        WatchResult::Responding => {
            println!("\nHost {host} is now responding!");
            ExitCode::SUCCESS
        }
        WatchResult::Cancelled => {
            println!("\nStopped watching host {host}");
            ExitCode::from(EXIT_CODE_INTERRUPTED)
        }
    })
}

/// Resolve the host on a blocking thread.
async fn resolve(host: String) -> anyhow::Result<hostwatch_core::Result<Resolved>> {
    Ok(tokio::task::spawn_blocking(move || Resolver::new(SystemLookup).resolve(&host)).await?)
}

/// Watch the resolved target on a blocking thread.
async fn watch(
    resolved: Resolved,
    identifier: Identifier,
    token: CancellationToken,
) -> anyhow::Result<WatchResult> {
    let target = resolved.target;
    Ok(tokio::task::spawn_blocking(move || {
        let prober = Prober::<SocketImpl>::for_target(identifier, target);
        let mut reporter = ConsoleReport::new(io::stdout());
        Watcher::new(prober).watch(target, &mut reporter, &token)
    })
    .await?)
}

async fn cancel_on_interrupt(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::debug!("interrupted");
            token.cancel();
        }
        Err(err) => tracing::warn!(%err, "unable to listen for Ctrl+C"),
    }
}

/// Configure the logging subscriber, writing to stderr.
fn configure_logging(cfg: &HostwatchConfig) {
    if cfg.verbose {
        let fmt_span = match cfg.log_span_events {
            LogSpanEvents::Off => FmtSpan::NONE,
            LogSpanEvents::Active => FmtSpan::ACTIVE,
            LogSpanEvents::Full => FmtSpan::FULL,
        };
        match cfg.log_format {
            LogFormat::Compact => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .compact()
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .pretty()
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .json()
                    .init();
            }
        }
    }
}
