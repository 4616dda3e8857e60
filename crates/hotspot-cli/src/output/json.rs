//! JSON-formatted output for CLI.

use std::path::Path;

use hotspot_core::{HotspotConfig, PeerIndex, RegistrySnapshot};
use serde::Serialize;
use serde_json::{json, Value};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON value for a scan snapshot, one entry per peer slot.
pub fn snapshot_value(snapshot: &RegistrySnapshot) -> Value {
    let peers: Vec<Value> = PeerIndex::all()
        .map(|index| {
            json!({
                "slot": index,
                "present": snapshot.presence[index.get()],
                "address": snapshot.peer_addresses[index.get()],
            })
        })
        .collect();

    json!({
        "primary": snapshot.primary,
        "peers": peers,
        "onlineCount": snapshot.online_count(),
        "online": snapshot.is_online(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

impl OutputFormatter for JsonOutput {
    fn format_snapshot(&self, snapshot: &RegistrySnapshot) -> String {
        Self::to_json(&snapshot_value(snapshot))
    }

    fn format_config(&self, config: &HotspotConfig, path: Option<&Path>) -> String {
        Self::to_json(&json!({
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}
