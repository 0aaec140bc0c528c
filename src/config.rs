//! # Broadcaster configuration.
//!
//! Provides [`Config`] settings applied to every endpoint a
//! [`Broadcaster`](crate::Broadcaster) creates.
//!
//! ## Sentinel values
//! - `endpoint_capacity = 0` → rendezvous delivery (no buffering)

/// Configuration for a [`Broadcaster`](crate::Broadcaster).
///
/// ## Field semantics
/// - `endpoint_capacity`: values each endpoint may hold before `publish` blocks
///   (`0` = rendezvous, the publisher waits until the consumer takes the value)
///
/// ## Notes
/// Fields are public. Prefer the helper accessors over checking the `0`
/// sentinel directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Per-endpoint buffer size.
    ///
    /// - `0` = rendezvous: `publish` completes a delivery only once the
    ///   subscriber has received the value
    /// - `n > 0` = bounded queue: `publish` blocks only while the queue is full
    ///
    /// A non-zero capacity relaxes the lock-step guarantee: a stalled
    /// subscriber stops the publisher only after `n` undelivered values.
    pub endpoint_capacity: usize,
}

impl Config {
    /// Rendezvous configuration (the default).
    #[must_use]
    pub fn rendezvous() -> Self {
        Self {
            endpoint_capacity: 0,
        }
    }

    /// Bounded configuration holding up to `capacity` values per endpoint.
    ///
    /// A `capacity` of `0` is the same as [`Config::rendezvous`].
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            endpoint_capacity: capacity,
        }
    }

    /// True when deliveries wait for the subscriber to take each value.
    #[inline]
    pub fn is_rendezvous(&self) -> bool {
        self.endpoint_capacity == 0
    }

    /// Slot count of the underlying queue, clamped to a minimum of 1.
    ///
    /// A rendezvous endpoint still needs one slot to hand the value over.
    #[inline]
    pub fn queue_slots(&self) -> usize {
        self.endpoint_capacity.max(1)
    }
}
