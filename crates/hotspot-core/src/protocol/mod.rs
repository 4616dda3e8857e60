//! Identification datagram protocol.
//!
//! Peers report with their slot index as a decimal string, the primary
//! controller reports with the reserved `live` prefix. Both may be NUL-padded.

pub mod identification;

pub use identification::{
    decode_identification, encode_identification, Identification, PeerIndex, HOTSPOT_PORT,
    PRIMARY_TAG,
};
