//! Hotspot CLI - run and exercise the liveness coordinator from a terminal.
//!
//! `serve` runs the hotspot itself, `scan` listens for a fixed time and
//! reports who is alive, and `announce` plays a peer board or the primary
//! controller.

mod cli;
mod commands;
mod display;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,hotspot_core=debug,hotspot=debug"
    } else {
        "warn,hotspot_core=info"
    };

    // Logs go to stderr so stdout stays clean for tables and JSON.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config, cli.json).await,
        Commands::Scan(args) => commands::run_scan(args, config, cli.json).await,
        Commands::Announce(args) => commands::run_announce(args, cli.json).await,
        Commands::Config(args) => commands::run_config(args, config, cli.json).await,
    }
}
