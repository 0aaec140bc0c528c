//! # Endpoint: write side of a subscription.
//!
//! An endpoint pairs a `tokio::sync::mpsc` sender with a delivery mode.
//!
//! ## Rendezvous handoff
//! ```text
//! deliver(v)                               Subscription::recv()
//!   ├─► send Envelope{ v, ack } ──[1 slot]──► take Envelope
//!   │                                          ├─► ack.send(())
//!   └─► await ack ◄───────────────────────────┘   └─► return v
//! ```
//! The single slot never holds more than one value because the publisher does
//! not move on until the ack arrives. This behaves like a queue of capacity zero.
//!
//! ## Bounded mode
//! With `Config::endpoint_capacity > 0` the envelope carries no ack and
//! `deliver` returns as soon as the value is queued.

use tokio::sync::{mpsc, oneshot};

use crate::config::Config;

use super::subscription::Subscription;

/// A value in flight, plus the handoff acknowledgement for rendezvous endpoints.
pub(crate) struct Envelope<T> {
    value: T,
    ack: Option<oneshot::Sender<()>>,
}

impl<T> Envelope<T> {
    /// Releases the waiting publisher (if any) and yields the value.
    pub(crate) fn open(self) -> T {
        if let Some(ack) = self.ack {
            let _ = ack.send(());
        }
        self.value
    }
}

/// Write side of one subscription, owned by the broadcaster.
pub(crate) struct Endpoint<T> {
    id: u64,
    tx: mpsc::Sender<Envelope<T>>,
    rendezvous: bool,
}

impl<T> Endpoint<T> {
    /// Creates a connected endpoint/subscription pair.
    pub(crate) fn pair(id: u64, cfg: &Config) -> (Self, Subscription<T>) {
        let (tx, rx) = mpsc::channel(cfg.queue_slots());
        let endpoint = Self {
            id,
            tx,
            rendezvous: cfg.is_rendezvous(),
        };
        (endpoint, Subscription::new(id, rx))
    }

    /// Subscription order id.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// True once the subscription has been dropped.
    pub(crate) fn is_detached(&self) -> bool {
        self.tx.is_closed()
    }

    /// Delivers one value, waiting for the consumer (rendezvous) or for queue space (bounded).
    ///
    /// Returns `false` if the subscription was dropped before it took the value.
    pub(crate) async fn deliver(&self, value: T) -> bool {
        if !self.rendezvous {
            return self.tx.send(Envelope { value, ack: None }).await.is_ok();
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        let envelope = Envelope {
            value,
            ack: Some(ack_tx),
        };
        if self.tx.send(envelope).await.is_err() {
            return false;
        }
        // Dropping the subscription drops the queued envelope and its ack sender.
        ack_rx.await.is_ok()
    }
}
