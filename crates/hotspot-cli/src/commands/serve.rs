//! Serve command: run the hotspot until Ctrl+C.

use std::path::Path;

use hotspot_core::config::DisplayKind;
use hotspot_core::display::{Display, DisplayFrame, DisplayStatus, LogDisplay, NullDisplay};
use hotspot_core::{HotspotConfig, HotspotService, LivenessRegistry};
use tracing::info;

use crate::cli::ServeArgs;
use crate::commands::config::load_config;
use crate::display::{JsonLinesDisplay, TerminalDisplay};
use crate::error::CliError;

/// Run the serve command
pub async fn run_serve(
    args: ServeArgs,
    explicit_config: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let (config, _) = load_config(explicit_config).await?;
    let config = apply_overrides(config, &args);
    config.validate()?;

    let mut display = select_display(&config, args.quiet, json);
    display.render(&DisplayFrame::new(
        &config.label,
        DisplayStatus::Binding,
        &LivenessRegistry::new().snapshot(),
    ));

    let mut service = HotspotService::bind(&config).await?;

    tokio::select! {
        result = service.run(display.as_mut()) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

fn apply_overrides(mut config: HotspotConfig, args: &ServeArgs) -> HotspotConfig {
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(window) = args.window_ms {
        config.liveness_window_ms = window;
    }
    if let Some(poll) = args.poll_ms {
        config.poll_timeout_ms = poll;
    }
    config
}

fn select_display(config: &HotspotConfig, quiet: bool, json: bool) -> Box<dyn Display> {
    if json {
        return Box::new(JsonLinesDisplay::new());
    }

    if !quiet {
        return Box::new(TerminalDisplay::new());
    }

    match config.display {
        DisplayKind::Log => Box::new(LogDisplay),
        DisplayKind::None => Box::new(NullDisplay),
    }
}
