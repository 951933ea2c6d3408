//! cosmosctl - Cosmos DB control-plane CLI

mod cli;
mod commands;
mod config;
mod connection;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = commands::dispatch(&cli).await {
        err.print_diagnostic();
        std::process::exit(1);
    }
}

/// RUST_LOG wins when set; otherwise -v flags pick the level.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cosmosctl={0},cosmos_mgmt={0}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
