//! Identification message codec.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::registry::PEER_SLOTS;

/// Default UDP port the hotspot listens on.
pub const HOTSPOT_PORT: u16 = 16841;

/// Reserved prefix identifying the primary controller.
pub const PRIMARY_TAG: &str = "live";

/// A validated peer slot index in `0..PEER_SLOTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PeerIndex(u8);

impl PeerIndex {
    /// Validate a raw integer as a peer index.
    pub fn new(raw: i64) -> Result<Self, ProtocolError> {
        if (0..PEER_SLOTS as i64).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(ProtocolError::OutOfRange(raw))
        }
    }

    /// Slot position in the registry tables.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Every valid index, in slot order.
    pub fn all() -> impl Iterator<Item = PeerIndex> {
        (0..PEER_SLOTS as u8).map(PeerIndex)
    }
}

impl TryFrom<i64> for PeerIndex {
    type Error = ProtocolError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        PeerIndex::new(raw)
    }
}

impl From<PeerIndex> for u8 {
    fn from(index: PeerIndex) -> Self {
        index.0
    }
}

impl fmt::Display for PeerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who an identification datagram came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identification {
    /// A peer board reporting its slot index.
    Peer(PeerIndex),
    /// The primary controller (`live` prefix).
    Primary,
}

impl FromStr for Identification {
    type Err = ProtocolError;

    /// Parse an already-decoded payload.
    ///
    /// Anything starting with `live` is the primary controller, the rest must
    /// be a base-10 index. Surrounding whitespace around the index is ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.starts_with(PRIMARY_TAG) {
            return Ok(Identification::Primary);
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::Empty);
        }

        let raw: i64 = trimmed
            .parse()
            .map_err(|_| ProtocolError::NotANumber(trimmed.to_string()))?;

        Ok(Identification::Peer(PeerIndex::new(raw)?))
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identification::Peer(index) => write!(f, "{}", index),
            Identification::Primary => f.write_str(PRIMARY_TAG),
        }
    }
}

/// Decode a raw datagram into an identification.
///
/// The payload is cut at the first NUL and must be UTF-8.
pub fn decode_identification(data: &[u8]) -> Result<Identification, ProtocolError> {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let text = std::str::from_utf8(&data[..end]).map_err(|_| ProtocolError::InvalidUtf8)?;
    text.parse()
}

/// Encode an identification the way the boards send it: text plus a NUL terminator.
pub fn encode_identification(identification: &Identification) -> Vec<u8> {
    let mut bytes = identification.to_string().into_bytes();
    bytes.push(0);
    bytes
}
