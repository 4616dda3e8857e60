//! Network side of the hotspot: the polling service and the announcer.

pub mod announce;
pub mod hotspot;
pub mod socket;

pub use announce::Announcer;
pub use hotspot::{CycleOutcome, HotspotService};
pub use socket::{create_listener_socket, create_sender_socket};
