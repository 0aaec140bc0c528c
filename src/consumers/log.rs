//! # LogWriter — simple value logger
//!
//! A minimal consumer that logs every received value through `tracing`.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! INFO pubsub: received consumer="sub1" value="one"
//! INFO pubsub: received consumer="sub1" value="two"
//! INFO pubsub: exiting consumer="sub1"
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::info;

use crate::consumers::Consume;

/// Value logging consumer.
#[derive(Clone, Copy, Debug)]
pub struct LogWriter {
    label: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagging its lines with `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("LogWriter")
    }
}

#[async_trait]
impl<T> Consume<T> for LogWriter
where
    T: Debug + Send + Sync + 'static,
{
    async fn on_value(&self, value: &T) {
        info!(target: "pubsub", consumer = self.label, value = ?value, "received");
    }

    async fn on_close(&self) {
        info!(target: "pubsub", consumer = self.label, "exiting");
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
