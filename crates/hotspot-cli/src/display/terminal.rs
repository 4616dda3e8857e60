use std::io::{self, Write};

use colored::*;
use hotspot_core::display::{panel_lines, Display, DisplayFrame, DisplayStatus};
use serde_json::{json, Value};

/// Redraws the panel in place, like the hotspot's OLED screen.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }
}

/// Colour the `[x]` cells of a panel row.
fn colorize_cells(row: &str) -> String {
    row.replace("[x]", &"[x]".green().bold().to_string())
}

impl Display for TerminalDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        let lines = panel_lines(frame);

        // Clear screen and home the cursor
        print!("\x1B[2J\x1B[1;1H");

        for (i, line) in lines.iter().enumerate() {
            let styled = match i {
                0 => line.bold().to_string(),
                1 if frame.primary.is_some() => line.cyan().to_string(),
                _ if i == lines.len() - 1 => match frame.status {
                    DisplayStatus::Updated => line.green().to_string(),
                    DisplayStatus::Refreshed => line.yellow().to_string(),
                    _ => line.dimmed().to_string(),
                },
                _ => colorize_cells(line),
            };
            println!("{}", styled);
        }

        println!();
        println!("{}", "Press Ctrl+C to stop".dimmed());

        io::stdout().flush().ok();
    }
}

/// Prints one JSON object per frame (NDJSON).
#[derive(Debug, Default)]
pub struct JsonLinesDisplay;

impl JsonLinesDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Display for JsonLinesDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        let mut output = serde_json::to_value(frame).unwrap_or(json!({}));
        if let Value::Object(ref mut map) = output {
            map.insert(
                "onlineCount".to_string(),
                json!(frame.presence.iter().filter(|p| **p).count()),
            );
            map.insert(
                "timestamp".to_string(),
                json!(chrono::Utc::now().to_rfc3339()),
            );
        }
        println!("{}", output);
        io::stdout().flush().ok();
    }
}
