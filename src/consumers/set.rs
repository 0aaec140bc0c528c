//! # ConsumerSet: one worker per subscription
//!
//! [`ConsumerSet`] subscribes each [`Consume`] implementation to a
//! [`Broadcaster`] and drives it from its own tokio task.
//!
//! ## What it guarantees
//! - Per-consumer order equals publish order.
//! - Panics inside consumers are caught and logged (isolation); the worker
//!   keeps draining its subscription so the publisher is not stalled forever.
//! - `join()` returns once every worker has observed end-of-stream.
//!
//! ## What it does **not** guarantee
//! - No ordering across different consumers.
//! - No buffering beyond the broadcaster's [`Config`](crate::Config).
//!
//! ## Diagram
//! ```text
//!    attach(&topic, consumers)
//!        │
//!        ├──► subscribe ──► spawn worker C1 ──► recv loop ──► on_value()
//!        ├──► subscribe ──► spawn worker C2 ──► recv loop ──► on_value()
//!        └──► subscribe ──► spawn worker CN ──► recv loop ──► on_value()
//!
//!    join() ──► await every worker (after topic.close())
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::broadcast::{Broadcaster, Subscription};

use super::Consume;

/// Worker handle with metadata.
struct Worker {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Set of running consumer workers.
#[derive(Default)]
pub struct ConsumerSet {
    workers: Vec<Worker>,
}

impl ConsumerSet {
    /// Subscribes every consumer to `topic` and spawns one worker per consumer.
    ///
    /// Consumers are subscribed in the order given. If the topic is already
    /// closed, a consumer gets no worker and its `on_close` runs immediately.
    ///
    /// Must be called within a tokio runtime.
    pub async fn attach<T>(topic: &Broadcaster<T>, consumers: Vec<Arc<dyn Consume<T>>>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut set = Self::default();
        for consumer in consumers {
            set.add(topic, consumer).await;
        }
        set
    }

    /// Subscribes one more consumer and spawns its worker.
    ///
    /// Returns `false` if the topic was already closed.
    pub async fn add<T>(&mut self, topic: &Broadcaster<T>, consumer: Arc<dyn Consume<T>>) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let name = consumer.name();
        let Some(subscription) = topic.subscribe().await else {
            debug!(consumer = name, "topic closed; consumer not attached");
            consumer.on_close().await;
            return false;
        };

        let handle = tokio::spawn(drive(subscription, consumer));
        self.workers.push(Worker { name, handle });
        true
    }

    /// Waits for every worker to reach end-of-stream.
    ///
    /// Only returns after the broadcaster has been closed.
    pub async fn join(self) {
        for worker in self.workers {
            if let Err(err) = worker.handle.await {
                warn!(consumer = worker.name, error = %err, "consumer worker failed");
            }
        }
    }

    /// True if no workers are running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Number of workers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }
}

/// Worker loop: feed every value to the consumer until end-of-stream.
async fn drive<T>(mut subscription: Subscription<T>, consumer: Arc<dyn Consume<T>>)
where
    T: Send + Sync + 'static,
{
    let name = consumer.name();
    while let Some(value) = subscription.recv().await {
        let fut = consumer.on_value(&value);
        if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
            warn!(
                consumer = name,
                info = %panic_info(&*panic_err),
                "consumer panicked; value skipped"
            );
        }
    }

    debug!(consumer = name, "end of stream");
    if let Err(panic_err) = AssertUnwindSafe(consumer.on_close()).catch_unwind().await {
        warn!(
            consumer = name,
            info = %panic_info(&*panic_err),
            "consumer panicked on close"
        );
    }
}

fn panic_info(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
