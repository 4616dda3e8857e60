//! Hotspot polling service.
//!
//! One cycle waits for a datagram up to the poll timeout, always sweeps the
//! registry, then records whatever arrived. Nothing is ever acknowledged.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::socket::create_listener_socket;
use crate::config::HotspotConfig;
use crate::display::{Display, DisplayFrame, DisplayStatus, NullDisplay};
use crate::error::Result;
use crate::protocol::{decode_identification, Identification};
use crate::registry::{LivenessRegistry, RegistrySnapshot};

/// Datagrams larger than this are truncated.
const RECV_BUFFER_SIZE: usize = 2048;

/// What happened during one polling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// A datagram arrived, valid or not
    pub received: bool,
    /// The identification recorded from it
    pub recorded: Option<Identification>,
    /// Records expired by this cycle's sweep
    pub expired: usize,
}

impl CycleOutcome {
    pub fn changed(&self) -> bool {
        self.recorded.is_some() || self.expired > 0
    }
}

/// The hotspot: a UDP socket plus the liveness registry it feeds.
pub struct HotspotService {
    socket: UdpSocket,
    registry: LivenessRegistry,
    label: String,
    poll_timeout: Duration,
    liveness_window: Duration,
    buf: Vec<u8>,
}

impl HotspotService {
    /// Validate the config and bind the listening socket.
    ///
    /// Failure here is fatal for the hotspot.
    pub async fn bind(config: &HotspotConfig) -> Result<Self> {
        config.validate()?;

        let std_socket = create_listener_socket(config.socket_addr())?;
        let socket = UdpSocket::from_std(std_socket)?;
        info!("Hotspot listening on {}", socket.local_addr()?);

        Ok(Self {
            socket,
            registry: LivenessRegistry::new(),
            label: config.label.clone(),
            poll_timeout: config.poll_timeout(),
            liveness_window: config.liveness_window(),
            buf: vec![0u8; RECV_BUFFER_SIZE],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn registry(&self) -> &LivenessRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.registry.snapshot()
    }

    pub fn frame(&self, status: DisplayStatus) -> DisplayFrame {
        DisplayFrame::new(&self.label, status, &self.registry.snapshot())
    }

    /// Decode a datagram and record it. Malformed payloads are dropped.
    pub fn handle_datagram(
        &mut self,
        data: &[u8],
        source: SocketAddr,
        now: Instant,
    ) -> Option<Identification> {
        record_datagram(&mut self.registry, data, source, now)
    }

    /// Run one polling cycle with the configured timeout.
    pub async fn poll_once(&mut self, display: &mut dyn Display) -> CycleOutcome {
        let wait = self.poll_timeout;
        self.poll_with_timeout(wait, display).await
    }

    async fn poll_with_timeout(
        &mut self,
        wait: Duration,
        display: &mut dyn Display,
    ) -> CycleOutcome {
        let recv_result = timeout(wait, self.socket.recv_from(&mut self.buf)).await;

        let datagram = match recv_result {
            Ok(Ok((len, addr))) => Some((len, addr)),
            Ok(Err(ref e)) => {
                warn!("UDP receive error: {}", e);
                None
            }
            Err(_) => {
                // Timeout - still sweep
                None
            }
        };

        let now = Instant::now();
        let expired = self.registry.sweep(now, self.liveness_window);
        if expired > 0 {
            debug!("Expired {} record(s)", expired);
        }

        let recorded = match datagram {
            Some((len, addr)) => {
                record_datagram(&mut self.registry, &self.buf[..len], addr, now)
            }
            None => None,
        };

        let outcome = CycleOutcome {
            received: datagram.is_some(),
            recorded,
            expired,
        };

        if outcome.changed() {
            let status = if recorded.is_some() {
                DisplayStatus::Updated
            } else {
                DisplayStatus::Refreshed
            };
            display.render(&self.frame(status));
        }

        outcome
    }

    /// Poll forever.
    pub async fn run(&mut self, display: &mut dyn Display) -> Result<()> {
        display.render(&self.frame(DisplayStatus::Ready));

        loop {
            self.poll_once(display).await;
        }
    }

    /// Listen for `duration` and return what was seen.
    pub async fn scan(config: &HotspotConfig, duration: Duration) -> Result<RegistrySnapshot> {
        let mut service = Self::bind(config).await?;
        let mut display = NullDisplay;
        let start = Instant::now();

        loop {
            let remaining = duration.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }

            let wait = remaining.min(service.poll_timeout);
            service.poll_with_timeout(wait, &mut display).await;
        }

        Ok(service.snapshot())
    }
}

fn record_datagram(
    registry: &mut LivenessRegistry,
    data: &[u8],
    source: SocketAddr,
    now: Instant,
) -> Option<Identification> {
    match decode_identification(data) {
        Ok(identification) => {
            debug!("Got {} from {}", identification, source);
            registry.apply(identification, source.ip(), now);
            Some(identification)
        }
        Err(e) => {
            debug!("Dropping datagram from {}: {}", source, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PeerIndex;
    use std::net::{IpAddr, Ipv4Addr};

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<DisplayFrame>,
    }

    impl Display for RecordingDisplay {
        fn render(&mut self, frame: &DisplayFrame) {
            self.frames.push(frame.clone());
        }
    }

    fn loopback_config(poll_timeout_ms: u64, liveness_window_ms: u64) -> HotspotConfig {
        HotspotConfig {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            poll_timeout_ms,
            liveness_window_ms,
            ..Default::default()
        }
    }

    async fn send_to(service: &HotspotService, payload: &[u8]) {
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        sender
            .send_to(payload, service.local_addr().unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_poll_once_records_datagram() {
        let mut service = HotspotService::bind(&loopback_config(1000, 10_000))
            .await
            .unwrap();
        let mut display = RecordingDisplay::default();

        send_to(&service, b"3\0\0\0").await;
        let outcome = service.poll_once(&mut display).await;

        assert!(outcome.received);
        assert_eq!(
            outcome.recorded,
            Some(Identification::Peer(PeerIndex::new(3).unwrap()))
        );

        let snapshot = service.snapshot();
        assert!(snapshot.presence[3]);
        assert_eq!(
            snapshot.peer_addresses[3],
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );

        assert_eq!(display.frames.len(), 1);
        assert_eq!(display.frames[0].status, DisplayStatus::Updated);
    }

    #[tokio::test]
    async fn test_poll_once_records_primary() {
        let mut service = HotspotService::bind(&loopback_config(1000, 10_000))
            .await
            .unwrap();

        send_to(&service, b"live").await;
        let outcome = service.poll_once(&mut NullDisplay).await;

        assert_eq!(outcome.recorded, Some(Identification::Primary));
        assert_eq!(service.snapshot().primary, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert!(!service.snapshot().is_online());
    }

    #[tokio::test]
    async fn test_malformed_datagram_is_dropped() {
        let mut service = HotspotService::bind(&loopback_config(1000, 10_000))
            .await
            .unwrap();
        let mut display = RecordingDisplay::default();

        send_to(&service, b"abc").await;
        let outcome = service.poll_once(&mut display).await;

        assert!(outcome.received);
        assert_eq!(outcome.recorded, None);
        assert!(service.snapshot().is_empty());
        assert!(display.frames.is_empty());
    }

    #[tokio::test]
    async fn test_idle_cycle_still_sweeps() {
        let mut service = HotspotService::bind(&loopback_config(10, 20))
            .await
            .unwrap();
        let mut display = RecordingDisplay::default();
        let source = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), 4000);

        service.handle_datagram(b"5", source, Instant::now());
        assert!(service.snapshot().presence[5]);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let outcome = service.poll_once(&mut display).await;

        assert!(!outcome.received);
        assert_eq!(outcome.expired, 1);
        assert!(!service.snapshot().presence[5]);
        assert_eq!(display.frames.len(), 1);
        assert_eq!(display.frames[0].status, DisplayStatus::Refreshed);

        // Nothing left to expire
        let outcome = service.poll_once(&mut display).await;
        assert!(!outcome.changed());
        assert_eq!(display.frames.len(), 1);
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let result = HotspotService::bind(&loopback_config(0, 10_000)).await;
        assert!(matches!(result, Err(crate::error::CoreError::Config(_))));
    }

    #[tokio::test]
    async fn test_scan_returns_snapshot() {
        let config = loopback_config(50, 10_000);
        let snapshot = HotspotService::scan(&config, Duration::from_millis(120))
            .await
            .unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_bind_fails_on_occupied_port() {
        let first = HotspotService::bind(&loopback_config(1000, 10_000))
            .await
            .unwrap();
        let taken = first.local_addr().unwrap().port();

        let mut config = loopback_config(1000, 10_000);
        config.port = taken;
        let second = HotspotService::bind(&config).await;
        assert!(matches!(second, Err(crate::error::CoreError::Io(_))));

        let scan = HotspotService::scan(&config, Duration::from_millis(10)).await;
        assert!(matches!(scan, Err(crate::error::CoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_single_listener_sees_every_peer() {
        let mut service = HotspotService::bind(&loopback_config(200, 10_000))
            .await
            .unwrap();

        for index in PeerIndex::all() {
            send_to(&service, index.to_string().as_bytes()).await;
        }
        for _ in PeerIndex::all() {
            service.poll_once(&mut NullDisplay).await;
        }

        assert_eq!(service.snapshot().online_count(), 15);
        for index in PeerIndex::all() {
            assert!(service.registry().peer(index).is_present());
        }
    }
}
