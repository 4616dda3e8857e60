//! Liveness tracking for peer boards and the primary controller.

pub mod liveness;
pub mod snapshot;

pub use liveness::{LivenessRegistry, PeerSlot};
pub use snapshot::RegistrySnapshot;

/// Number of peer slots the hotspot tracks.
pub const PEER_SLOTS: usize = 15;
