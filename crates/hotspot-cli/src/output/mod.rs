//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use std::path::Path;

use hotspot_core::{HotspotConfig, RegistrySnapshot};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format a registry snapshot
    fn format_snapshot(&self, snapshot: &RegistrySnapshot) -> String;

    /// Format the effective configuration and where it came from
    fn format_config(&self, config: &HotspotConfig, path: Option<&Path>) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
