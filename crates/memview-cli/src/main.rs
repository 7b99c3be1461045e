mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn by default when RUST_LOG is unset)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("memview=warn,memview_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Read {
            pid,
            address,
            kind,
            size,
            json,
        } => commands::read::run(pid, address, kind, size, json),
        Command::Hexdump { pid, address, size } => commands::hexdump::run(pid, address, size),
    }
}
