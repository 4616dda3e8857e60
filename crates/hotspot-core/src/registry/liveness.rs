//! Fixed-size liveness registry.
//!
//! Every slot is recomputed from its timestamp on each sweep rather than
//! flipped incrementally, so presence always reflects the last evaluation.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use super::snapshot::RegistrySnapshot;
use super::PEER_SLOTS;
use crate::error::ProtocolError;
use crate::protocol::{Identification, PeerIndex};

/// Liveness record for one reporting device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerSlot {
    present: bool,
    last_seen: Option<Instant>,
    source: Option<IpAddr>,
}

impl PeerSlot {
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// When this slot last reported. Kept after expiry.
    pub fn last_seen(&self) -> Option<Instant> {
        self.last_seen
    }

    /// Address of the last report, `None` once expired.
    pub fn source(&self) -> Option<IpAddr> {
        self.source
    }

    fn touch(&mut self, source: IpAddr, now: Instant) {
        self.present = true;
        self.source = Some(source);
        // Timestamps never move backwards.
        self.last_seen = Some(match self.last_seen {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// Clear the slot if it has been silent longer than `window`.
    ///
    /// Returns true only when the slot went from present to absent.
    fn expire_if_stale(&mut self, now: Instant, window: Duration) -> bool {
        let stale = match self.last_seen {
            Some(seen) => now.saturating_duration_since(seen) > window,
            None => true,
        };

        if !stale {
            return false;
        }

        let was_present = self.present;
        self.present = false;
        self.source = None;
        was_present
    }
}

/// Registry of the fifteen peer slots plus the primary controller record.
#[derive(Debug, Clone, Default)]
pub struct LivenessRegistry {
    peers: [PeerSlot; PEER_SLOTS],
    primary: PeerSlot,
}

impl LivenessRegistry {
    /// Create a registry with every slot absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report whose payload has already been decoded to text.
    ///
    /// On error the registry is left untouched.
    pub fn record(
        &mut self,
        identifier: &str,
        source: IpAddr,
        now: Instant,
    ) -> Result<Identification, ProtocolError> {
        let identification: Identification = identifier.parse()?;
        self.apply(identification, source, now);
        Ok(identification)
    }

    /// Record an already decoded identification.
    pub fn apply(&mut self, identification: Identification, source: IpAddr, now: Instant) {
        match identification {
            Identification::Primary => self.primary.touch(source, now),
            Identification::Peer(index) => self.peers[index.get()].touch(source, now),
        }
    }

    /// Expire every record silent for longer than `window`.
    ///
    /// Returns the number of records that went absent during this call.
    pub fn sweep(&mut self, now: Instant, window: Duration) -> usize {
        let mut expired = 0;

        if self.primary.expire_if_stale(now, window) {
            expired += 1;
        }

        for slot in self.peers.iter_mut() {
            if slot.expire_if_stale(now, window) {
                expired += 1;
            }
        }

        expired
    }

    /// Read-only view for rendering and reporting.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            presence: self.peers.map(|slot| slot.present),
            peer_addresses: self.peers.map(|slot| slot.source),
            primary: self.primary.source,
        }
    }

    pub fn peer(&self, index: PeerIndex) -> &PeerSlot {
        &self.peers[index.get()]
    }

    pub fn primary(&self) -> &PeerSlot {
        &self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const WINDOW: Duration = Duration::from_millis(10_000);

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_new_registry_is_absent() {
        let registry = LivenessRegistry::new();
        let snapshot = registry.snapshot();

        assert!(snapshot.presence.iter().all(|p| !p));
        assert!(snapshot.peer_addresses.iter().all(Option::is_none));
        assert_eq!(snapshot.primary, None);
    }

    #[test]
    fn test_record_every_valid_index() {
        let t0 = Instant::now();

        for index in PeerIndex::all() {
            let mut registry = LivenessRegistry::new();
            registry
                .record(&index.to_string(), ip(5), t0)
                .unwrap();

            let snapshot = registry.snapshot();
            assert!(snapshot.presence[index.get()]);
            assert_eq!(snapshot.peer_addresses[index.get()], Some(ip(5)));
            assert_eq!(snapshot.online_count(), 1);

            registry.sweep(at(t0, 10_000), WINDOW);
            assert!(registry.snapshot().presence[index.get()], "slot {}", index);
        }
    }

    #[test]
    fn test_peer_expiry_scenario() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();

        registry.record("3", ip(5), t0).unwrap();
        assert!(registry.snapshot().presence[3]);

        assert_eq!(registry.sweep(at(t0, 5_000), WINDOW), 0);
        assert!(registry.snapshot().presence[3]);

        assert_eq!(registry.sweep(at(t0, 10_001), WINDOW), 1);
        let snapshot = registry.snapshot();
        assert!(!snapshot.presence[3]);
        assert_eq!(snapshot.peer_addresses[3], None);
    }

    #[test]
    fn test_primary_expiry_scenario() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();

        let id = registry.record("live", ip(9), t0).unwrap();
        assert_eq!(id, Identification::Primary);
        assert_eq!(registry.snapshot().primary, Some(ip(9)));

        registry.sweep(at(t0, 15_000), WINDOW);
        assert_eq!(registry.snapshot().primary, None);
    }

    #[test]
    fn test_primary_does_not_touch_peers() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();

        registry.record("live", ip(9), t0).unwrap();

        let snapshot = registry.snapshot();
        assert!(snapshot.presence.iter().all(|p| !p));
        assert!(snapshot.peer_addresses.iter().all(Option::is_none));
        assert!(registry.primary().is_present());
    }

    #[test]
    fn test_malformed_leaves_state_unchanged() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry.record("2", ip(2), t0).unwrap();
        let before = registry.snapshot();

        for payload in ["abc", "", "20", "-1", "15"] {
            assert!(registry.record(payload, ip(7), at(t0, 1)).is_err());
        }

        assert_eq!(registry.snapshot(), before);
        assert_eq!(registry.peer(PeerIndex::new(2).unwrap()).last_seen(), Some(t0));
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry.record("0", ip(1), t0).unwrap();
        registry.record("live", ip(9), t0).unwrap();
        registry.record("1", ip(2), at(t0, 8_000)).unwrap();

        let now = at(t0, 12_000);
        assert_eq!(registry.sweep(now, WINDOW), 2);
        let after_first = registry.snapshot();

        assert_eq!(registry.sweep(now, WINDOW), 0);
        assert_eq!(registry.snapshot(), after_first);
        assert!(after_first.presence[1]);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry.record("4", ip(4), t0).unwrap();

        registry.sweep(at(t0, 10_000), WINDOW);
        assert!(registry.snapshot().presence[4]);
    }

    #[test]
    fn test_refresh_extends_liveness() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry.record("6", ip(6), t0).unwrap();
        registry.record("6", ip(16), at(t0, 9_000)).unwrap();

        registry.sweep(at(t0, 15_000), WINDOW);
        let snapshot = registry.snapshot();
        assert!(snapshot.presence[6]);
        assert_eq!(snapshot.peer_addresses[6], Some(ip(16)));
    }

    #[test]
    fn test_timestamps_never_move_backwards() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        let index = PeerIndex::new(8).unwrap();

        registry.record("8", ip(8), at(t0, 5_000)).unwrap();
        registry.record("8", ip(8), t0).unwrap();

        assert_eq!(registry.peer(index).last_seen(), Some(at(t0, 5_000)));
    }

    #[test]
    fn test_slot_reappears_after_expiry() {
        let t0 = Instant::now();
        let mut registry = LivenessRegistry::new();
        registry.record("11", ip(11), t0).unwrap();
        registry.sweep(at(t0, 20_000), WINDOW);
        assert!(!registry.snapshot().presence[11]);

        registry.record("11", ip(12), at(t0, 21_000)).unwrap();
        let snapshot = registry.snapshot();
        assert!(snapshot.presence[11]);
        assert_eq!(snapshot.peer_addresses[11], Some(ip(12)));
    }
}
