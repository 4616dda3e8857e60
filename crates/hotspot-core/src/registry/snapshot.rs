//! Read-only registry snapshot.

use std::net::IpAddr;

use serde::Serialize;

use super::PEER_SLOTS;
use crate::protocol::PeerIndex;

/// Point-in-time view of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// Presence flag per slot, in slot order.
    pub presence: [bool; PEER_SLOTS],
    /// Last reporting address per slot, `None` when absent.
    pub peer_addresses: [Option<IpAddr>; PEER_SLOTS],
    /// Primary controller address, `None` when absent.
    pub primary: Option<IpAddr>,
}

impl RegistrySnapshot {
    /// Number of peers currently present.
    pub fn online_count(&self) -> usize {
        self.presence.iter().filter(|p| **p).count()
    }

    /// Whether the peer table counts as online (at least one peer present).
    pub fn is_online(&self) -> bool {
        self.presence.iter().any(|p| *p)
    }

    pub fn primary_present(&self) -> bool {
        self.primary.is_some()
    }

    /// Present peers with their addresses, in slot order.
    pub fn present_peers(&self) -> Vec<(PeerIndex, IpAddr)> {
        PeerIndex::all()
            .filter_map(|index| {
                self.peer_addresses[index.get()]
                    .filter(|_| self.presence[index.get()])
                    .map(|addr| (index, addr))
            })
            .collect()
    }

    /// Whether nothing at all has been seen.
    pub fn is_empty(&self) -> bool {
        !self.is_online() && !self.primary_present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LivenessRegistry;
    use std::net::Ipv4Addr;
    use std::time::Instant;

    #[test]
    fn test_counts_and_present_peers() {
        let now = Instant::now();
        let mut registry = LivenessRegistry::new();
        let a = IpAddr::V4(Ipv4Addr::new(192, 168, 4, 2));
        let b = IpAddr::V4(Ipv4Addr::new(192, 168, 4, 3));
        registry.record("9", b, now).unwrap();
        registry.record("1", a, now).unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.online_count(), 2);
        assert!(snapshot.is_online());
        assert!(!snapshot.primary_present());
        assert!(!snapshot.is_empty());

        let peers = snapshot.present_peers();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0], (PeerIndex::new(1).unwrap(), a));
        assert_eq!(peers[1], (PeerIndex::new(9).unwrap(), b));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LivenessRegistry::new().snapshot();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_online());
        assert!(snapshot.present_peers().is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let now = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry
            .record("live", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)), now)
            .unwrap();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["primary"], "10.0.0.9");
        assert_eq!(json["presence"].as_array().unwrap().len(), PEER_SLOTS);
        assert!(json["peerAddresses"][0].is_null());
    }
}
