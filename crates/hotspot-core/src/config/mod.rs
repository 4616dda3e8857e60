//! Hotspot configuration.
//!
//! Read once at startup from a JSON file; missing fields take defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ConfigError;
use crate::protocol::HOTSPOT_PORT;

/// Default display label, as shown on the hotspot's screen.
pub const DEFAULT_LABEL: &str = "~ Hotspot v0.2 ~";

/// Which display the service should drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    None,
    #[default]
    Log,
}

impl DisplayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayKind::None => "none",
            DisplayKind::Log => "log",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotspotConfig {
    /// Label drawn on the first display line
    pub label: String,
    /// Address to bind the UDP socket on
    pub bind_address: IpAddr,
    /// UDP port for identification datagrams
    pub port: u16,
    /// How long one polling cycle waits for a datagram
    pub poll_timeout_ms: u64,
    /// Silence after which a record expires
    pub liveness_window_ms: u64,
    pub display: DisplayKind,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: HOTSPOT_PORT,
            poll_timeout_ms: 1000,
            liveness_window_ms: 10_000,
            display: DisplayKind::default(),
        }
    }
}

impl HotspotConfig {
    /// Load and validate a config file.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path).await?;
        let config: HotspotConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path).await {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_timeout_ms == 0 {
            return Err(invalid("pollTimeoutMs", "must be greater than zero"));
        }

        if self.liveness_window_ms == 0 {
            return Err(invalid("livenessWindowMs", "must be greater than zero"));
        }

        if self.liveness_window_ms < self.poll_timeout_ms {
            return Err(invalid(
                "livenessWindowMs",
                "must not be shorter than pollTimeoutMs",
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.liveness_window_ms)
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Platform-specific location of the hotspot config file.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "hotspot", "hotspot")
        .map(|dirs| dirs.config_dir().join("hotspot.json"))
}
