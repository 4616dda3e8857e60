//! Table-formatted output for CLI.

use std::path::Path;

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use hotspot_core::{HotspotConfig, PeerIndex, RegistrySnapshot};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_snapshot(&self, snapshot: &RegistrySnapshot) -> String {
        let primary = match snapshot.primary {
            Some(ip) => format!("Primary: {} {}", "[OK]".green(), ip),
            None => format!("Primary: {}", "[--]".dimmed()),
        };

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Slot", "Status", "Address"]);

        for index in PeerIndex::all() {
            let status_cell = if snapshot.presence[index.get()] {
                Cell::new("alive").fg(Color::Green)
            } else {
                Cell::new("-").fg(Color::DarkGrey)
            };

            let address = snapshot.peer_addresses[index.get()]
                .map(|ip| ip.to_string())
                .unwrap_or_default();

            table.add_row(vec![Cell::new(index.to_string()), status_cell, Cell::new(address)]);
        }

        format!(
            "{}\n{}\n\nFound {} peer(s)",
            primary,
            table,
            snapshot.online_count()
        )
    }

    fn format_config(&self, config: &HotspotConfig, path: Option<&Path>) -> String {
        let mut lines = Vec::new();

        let source = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        lines.push(format!("Config: {}", source));
        lines.push(format!("  Label:        {}", config.label));
        lines.push(format!("  Listen:       {}", config.socket_addr()));
        lines.push(format!("  Poll timeout: {} ms", config.poll_timeout_ms));
        lines.push(format!("  Liveness:     {} ms", config.liveness_window_ms));
        lines.push(format!("  Display:      {}", config.display.as_str()));

        lines.join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
