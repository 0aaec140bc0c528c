//! # Broadcaster: single-topic fan-out.
//!
//! [`Broadcaster`] owns the write side of every subscription and a closed flag,
//! both guarded by one [`tokio::sync::RwLock`].
//!
//! ## Locking
//! ```text
//! subscribe() ── write lock ──► append endpoint      (None if closed)
//! publish(v)  ── read lock  ──► deliver to E1, E2 ... EN in order
//! close()     ── write lock ──► closed = true, drop every endpoint
//! ```
//!
//! ## Rules
//! - **Ordering**: each subscription sees values in publish order, without gaps
//!   or duplicates, from the moment it subscribed until close.
//! - **Sequential delivery**: delivery to endpoint `i` completes before
//!   endpoint `i + 1` is offered the value.
//! - **Stalls**: deliveries run under the read lock, so a subscription that
//!   stops reading blocks `publish` and also `subscribe`/`close`.
//! - **Terminal close**: after close, `subscribe` returns `None` and `publish`
//!   is ignored. Closing twice is a no-op.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::config::Config;

use super::endpoint::Endpoint;
use super::subscription::Subscription;

/// State protected by the broadcaster lock.
struct Registry<T> {
    endpoints: Vec<Endpoint<T>>,
    closed: bool,
}

impl<T> Registry<T> {
    /// Forgets endpoints whose subscriptions were dropped.
    fn prune_detached(&mut self) {
        self.endpoints.retain(|ep| {
            let keep = !ep.is_detached();
            if !keep {
                debug!(subscription = ep.id(), "pruned detached subscription");
            }
            keep
        });
    }
}

/// In-process publish/subscribe topic.
///
/// Share it between the publisher and subscribers with an `Arc`.
///
/// ### Properties
/// - **Rendezvous by default**: `publish` waits for each subscriber to take the value.
/// - **No replay**: subscriptions only see values published after they were created.
/// - **Two states**: Open → Closed, one-way.
pub struct Broadcaster<T> {
    registry: RwLock<Registry<T>>,
    next_id: AtomicU64,
    cfg: Config,
}

impl<T: Clone> Broadcaster<T> {
    /// Creates an open broadcaster with rendezvous endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an open broadcaster with the given endpoint configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            registry: RwLock::new(Registry {
                endpoints: Vec::new(),
                closed: false,
            }),
            next_id: AtomicU64::new(0),
            cfg,
        }
    }

    /// Returns the configuration endpoints are created with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Registers a new subscription.
    ///
    /// Returns `None` if the broadcaster is already closed; treat that as an
    /// empty, already-terminated stream.
    ///
    /// Waits for the exclusive lock, so it blocks while a `publish` is stalled
    /// on an idle subscriber.
    pub async fn subscribe(&self) -> Option<Subscription<T>> {
        let mut reg = self.registry.write().await;
        if reg.closed {
            debug!("subscribe after close; no endpoint created");
            return None;
        }
        reg.prune_detached();

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (endpoint, subscription) = Endpoint::pair(id, &self.cfg);
        reg.endpoints.push(endpoint);
        debug!(
            subscription = id,
            subscribers = reg.endpoints.len(),
            "subscribed"
        );
        Some(subscription)
    }

    /// Delivers `value` to every current subscription, in subscription order.
    ///
    /// - Publishing after [`close`](Self::close) is silently ignored.
    /// - With rendezvous endpoints each delivery completes only when that
    ///   subscriber has received the value; an idle subscriber blocks this call
    ///   indefinitely.
    /// - Dropped subscriptions are skipped.
    pub async fn publish(&self, value: T) {
        let reg = self.registry.read().await;
        if reg.closed {
            debug!("publish after close ignored");
            return;
        }

        let Some((last, rest)) = reg.endpoints.split_last() else {
            trace!("publish with no subscribers");
            return;
        };
        for endpoint in rest {
            Self::deliver_to(endpoint, value.clone()).await;
        }
        Self::deliver_to(last, value).await;
    }

    async fn deliver_to(endpoint: &Endpoint<T>, value: T) {
        if endpoint.deliver(value).await {
            trace!(subscription = endpoint.id(), "delivered");
        } else {
            debug!(subscription = endpoint.id(), "subscription dropped; value skipped");
        }
    }

    /// Closes the topic.
    ///
    /// Marks the broadcaster closed and ends the stream of every subscription.
    /// Each subscription first receives everything published before the close,
    /// then observes end-of-stream exactly once. Idempotent.
    pub async fn close(&self) {
        let mut reg = self.registry.write().await;
        if reg.closed {
            debug!("close on closed broadcaster ignored");
            return;
        }
        reg.closed = true;
        let subscribers = reg.endpoints.len();
        reg.endpoints.clear();
        debug!(subscribers, "broadcaster closed");
    }

    /// True once [`close`](Self::close) has completed.
    pub async fn is_closed(&self) -> bool {
        self.registry.read().await.closed
    }

    /// Number of live subscriptions (dropped ones are not counted).
    pub async fn subscriber_count(&self) -> usize {
        let reg = self.registry.read().await;
        reg.endpoints.iter().filter(|ep| !ep.is_detached()).count()
    }
}

impl<T: Clone> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("cfg", &self.cfg)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
