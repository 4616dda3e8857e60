//! Scan command implementation.

use std::path::Path;
use std::time::Duration;

use hotspot_core::HotspotService;

use crate::cli::ScanArgs;
use crate::commands::config::load_config;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the scan command
pub async fn run_scan(
    args: ScanArgs,
    explicit_config: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    if args.duration == 0 {
        return Err(CliError::InvalidArgument(
            "Scan duration must be at least one second".to_string(),
        ));
    }

    let (mut config, _) = load_config(explicit_config).await?;
    if let Some(port) = args.port {
        config.port = port;
    }

    if !json {
        println!(
            "Scanning port {} for {} seconds...",
            config.port, args.duration
        );
    }

    let snapshot = HotspotService::scan(&config, Duration::from_secs(args.duration)).await?;

    println!("{}", formatter.format_snapshot(&snapshot));

    if snapshot.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    Ok(())
}
