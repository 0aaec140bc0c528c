//! # Consumers: task-per-subscription workers.
//!
//! This module provides the [`Consume`] trait and [`ConsumerSet`], which runs
//! one worker task per consumer, each reading its own
//! [`Subscription`](crate::Subscription) until end-of-stream.
//!
//! ## Architecture
//! ```text
//! Broadcaster ──► Subscription 1 ──► worker 1 ──► consumer1.on_value()
//!             ├─► Subscription 2 ──► worker 2 ──► consumer2.on_value()
//!             └─► Subscription N ──► worker N ──► consumerN.on_value()
//!                                       │
//!                                       └─► end-of-stream ──► on_close()
//! ```
//!
//! ## Implementing custom consumers
//! ```no_run
//! use pubsub::Consume;
//! use async_trait::async_trait;
//!
//! struct Counter;
//!
//! #[async_trait]
//! impl Consume<u64> for Counter {
//!     async fn on_value(&self, value: &u64) {
//!         let _ = value;
//!     }
//! }
//! ```

mod consume;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use consume::Consume;
pub use set::ConsumerSet;

#[cfg(feature = "logging")]
pub use log::LogWriter;
