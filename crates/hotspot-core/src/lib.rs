//! Hotspot core - liveness tracking for peer boards and the primary controller.
//!
//! Peers report their slot index over UDP, the primary controller reports
//! with the `live` tag. The hotspot keeps a fixed table of who reported
//! recently and renders it to an injected [`display::Display`].

pub mod config;
pub mod display;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod service;

pub use config::HotspotConfig;
pub use error::{CoreError, Result};
pub use protocol::{Identification, PeerIndex};
pub use registry::{LivenessRegistry, RegistrySnapshot, PEER_SLOTS};
pub use service::{Announcer, HotspotService};
