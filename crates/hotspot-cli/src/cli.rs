//! CLI argument definitions using clap.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hotspot_core::Identification;

/// Hotspot - liveness coordinator for peer boards and the primary controller
#[derive(Parser, Debug)]
#[command(name = "hotspot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "HOTSPOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the hotspot until Ctrl+C
    Serve(ServeArgs),

    /// Listen for a while and report who is alive
    Scan(ScanArgs),

    /// Send identification datagrams to a hotspot
    Announce(AnnounceArgs),

    /// Configuration file management
    Config(ConfigArgs),
}

// ==================== Serve ====================

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// UDP port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Liveness window in milliseconds (overrides config)
    #[arg(long)]
    pub window_ms: Option<u64>,

    /// Poll timeout in milliseconds (overrides config)
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Don't draw the terminal panel; use the configured display instead
    #[arg(short, long)]
    pub quiet: bool,
}

// ==================== Scan ====================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Scan duration in seconds
    #[arg(short, long, default_value = "5")]
    pub duration: u64,

    /// UDP port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

// ==================== Announce ====================

#[derive(Args, Debug)]
pub struct AnnounceArgs {
    /// Peer index (0-14) or "live" for the primary controller
    #[arg(value_parser = parse_identification)]
    pub identification: Identification,

    /// Hotspot address, host or host:port
    #[arg(short, long, default_value = "192.168.4.1")]
    pub target: String,

    /// Interval between datagrams in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub interval_ms: u64,

    /// Stop after this many datagrams (default: run until Ctrl+C)
    #[arg(short, long)]
    pub count: Option<u64>,
}

fn parse_identification(value: &str) -> Result<Identification, String> {
    value.parse().map_err(|e| format!("{}", e))
}

// ==================== Config ====================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Print the config file location
    Path,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
