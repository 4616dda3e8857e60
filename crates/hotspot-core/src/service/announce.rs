//! Identification sender.
//!
//! Plays the reporting side: a peer board sending its index, or the primary
//! host sending `live`, at a fixed interval.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::socket::create_sender_socket;
use crate::error::{CoreError, Result};
use crate::protocol::{encode_identification, Identification};

pub struct Announcer {
    socket: UdpSocket,
    target: SocketAddr,
    identification: Identification,
    payload: Vec<u8>,
}

impl Announcer {
    /// Create an announcer for `identification` aimed at `target`.
    pub async fn new(identification: Identification, target: SocketAddr) -> Result<Self> {
        let std_socket = create_sender_socket(target)?;
        let socket = UdpSocket::from_std(std_socket)?;

        Ok(Self {
            socket,
            target,
            identification,
            payload: encode_identification(&identification),
        })
    }

    pub fn identification(&self) -> Identification {
        self.identification
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send a single identification datagram.
    pub async fn announce_once(&self) -> Result<()> {
        let sent = self.socket.send_to(&self.payload, self.target).await?;
        if sent != self.payload.len() {
            return Err(CoreError::Other(format!(
                "Short send to {}: {} of {} bytes",
                self.target,
                sent,
                self.payload.len()
            )));
        }

        debug!("Announced {} to {}", self.identification, self.target);
        Ok(())
    }

    /// Announce every `period`, `count` times or forever when `None`.
    ///
    /// `on_sent` gets the running total after each datagram. Returns the
    /// number sent.
    pub async fn run<F>(&self, period: Duration, count: Option<u64>, mut on_sent: F) -> Result<u64>
    where
        F: FnMut(u64),
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sent = 0u64;

        while count.map_or(true, |limit| sent < limit) {
            ticker.tick().await;
            self.announce_once().await?;
            sent += 1;
            on_sent(sent);
        }

        Ok(sent)
    }
}
