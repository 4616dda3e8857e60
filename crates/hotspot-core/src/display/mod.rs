//! Display capability.
//!
//! The hotspot renders its state after every cycle that changed something.
//! Real screens live outside this crate; they implement [`Display`].

pub mod panel;

pub use panel::{panel_lines, presence_cells};

use std::net::IpAddr;

use serde::Serialize;
use tracing::info;

use crate::registry::{RegistrySnapshot, PEER_SLOTS};

/// Status line shown under the peer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Socket is being bound
    Binding,
    /// Listening, nothing processed yet
    Ready,
    /// A sweep expired at least one record
    Refreshed,
    /// A datagram was recorded
    Updated,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Binding => "Binding ...",
            DisplayStatus::Ready => "Ready.",
            DisplayStatus::Refreshed => "Refreshed.",
            DisplayStatus::Updated => "Updated.",
        }
    }
}

/// Everything a screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFrame {
    pub label: String,
    pub status: DisplayStatus,
    pub primary: Option<IpAddr>,
    pub presence: [bool; PEER_SLOTS],
}

impl DisplayFrame {
    pub fn new(label: &str, status: DisplayStatus, snapshot: &RegistrySnapshot) -> Self {
        Self {
            label: label.to_string(),
            status,
            primary: snapshot.primary,
            presence: snapshot.presence,
        }
    }
}

/// Render target for hotspot state. Fire-and-forget.
pub trait Display {
    fn render(&mut self, frame: &DisplayFrame);
}

/// Used when no screen is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn render(&mut self, _frame: &DisplayFrame) {}
}

/// Emits every frame as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl Display for LogDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        info!(
            status = frame.status.as_str(),
            primary = %frame.primary.map(|ip| ip.to_string()).unwrap_or_default(),
            peers = %presence_cells(&frame.presence),
            "{}",
            frame.label
        );
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn render(&mut self, frame: &DisplayFrame) {
        (**self).render(frame)
    }
}
