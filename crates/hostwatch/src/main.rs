use crate::config::{Args, HostwatchAction};
use clap::Parser;
use std::process::{self, ExitCode};

mod app;
mod config;
mod print;
mod report;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let pid = u16::try_from(process::id() & 0xffff)?;
    match HostwatchAction::from(args) {
        HostwatchAction::Watch(cfg) => app::run_hostwatch(cfg, pid).await,
        HostwatchAction::PrintUsage => {
            print::print_usage();
            Ok(ExitCode::FAILURE)
        }
    }
}
