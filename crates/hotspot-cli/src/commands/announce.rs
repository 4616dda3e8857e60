//! Announce command: act as a peer board or the primary controller.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use colored::*;
use hotspot_core::protocol::HOTSPOT_PORT;
use hotspot_core::Announcer;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tokio::net::lookup_host;

use crate::cli::AnnounceArgs;
use crate::error::CliError;

/// Run the announce command
pub async fn run_announce(args: AnnounceArgs, json: bool) -> Result<(), CliError> {
    if args.interval_ms == 0 {
        return Err(CliError::InvalidArgument(
            "Interval must be greater than zero".to_string(),
        ));
    }

    let announcer =
        Announcer::new(args.identification, resolve_target(&args.target).await?).await?;
    let identification = announcer.identification();
    let target = announcer.target();
    let period = Duration::from_millis(args.interval_ms);

    match args.count {
        Some(count) if !json => {
            let pb = ProgressBar::new(count);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .map_err(|e| CliError::Other(e.to_string()))?
                    .progress_chars("#>-"),
            );
            pb.set_message(format!("Announcing {} to {}", identification, target));

            let sent = announcer
                .run(period, Some(count), |n| pb.set_position(n))
                .await?;

            pb.finish_with_message(format!("Sent {} datagram(s) to {}", sent, target));
        }
        count => {
            if !json {
                println!(
                    "Announcing {} to {} every {} ms (press Ctrl+C to stop)...",
                    identification.to_string().bold(),
                    target,
                    args.interval_ms
                );
            }

            let report = move |n: u64| {
                if json {
                    let line = json!({
                        "identification": identification,
                        "target": target.to_string(),
                        "sent": n,
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                    });
                    println!("{}", line);
                }
            };

            tokio::select! {
                result = announcer.run(period, count, report) => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {}
            }
        }
    }

    Ok(())
}

/// Resolve `host`, `host:port`, `ip` or `ip:port`, defaulting to the hotspot port.
pub async fn resolve_target(target: &str) -> Result<SocketAddr, CliError> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, HOTSPOT_PORT));
    }

    let with_port = if target.contains(':') {
        target.to_string()
    } else {
        format!("{}:{}", target, HOTSPOT_PORT)
    };

    let addr = lookup_host(with_port.as_str())
        .await
        .map_err(|e| CliError::InvalidArgument(format!("Cannot resolve {}: {}", target, e)))?
        .next()
        .ok_or_else(|| CliError::InvalidArgument(format!("No address for {}", target)));
    addr
}
