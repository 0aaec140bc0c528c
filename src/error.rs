//! Error types returned by subscriptions.
//!
//! The broadcaster itself has no error path: subscribing to a closed topic
//! yields `None` and publishing to it is a no-op. The only typed error is
//! [`TryRecvError`], returned by the non-blocking
//! [`Subscription::try_recv`](crate::Subscription::try_recv).

use thiserror::Error;

/// # Errors produced by a non-blocking receive.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// No value is ready yet; the topic is still open.
    #[error("no value available")]
    Empty,

    /// The topic was closed and every value published before the close was received.
    #[error("topic closed")]
    Closed,
}

impl TryRecvError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use pubsub::TryRecvError;
    ///
    /// assert_eq!(TryRecvError::Closed.as_label(), "recv_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TryRecvError::Empty => "recv_empty",
            TryRecvError::Closed => "recv_closed",
        }
    }

    /// Returns a human-readable message.
    pub fn as_message(&self) -> String {
        match self {
            TryRecvError::Empty => "subscription has no pending value".to_string(),
            TryRecvError::Closed => "subscription reached end-of-stream".to_string(),
        }
    }

    /// True once the subscription will never yield another value.
    pub fn is_closed(&self) -> bool {
        matches!(self, TryRecvError::Closed)
    }
}
