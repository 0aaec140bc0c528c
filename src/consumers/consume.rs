//! # Consumer trait.
//!
//! Provides [`Consume`], the extension point for handling broadcast values in
//! a dedicated worker task.
//!
//! ## Rules
//! - Values arrive in publish order, one at a time.
//! - While `on_value` runs, the publisher is blocked on this consumer
//!   (rendezvous endpoints hand over the next value only after it returns).
//! - Panics in `on_value` are caught and logged; the worker keeps consuming.

use async_trait::async_trait;

/// Handler for values received from one subscription.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Keep `on_value` short: a slow consumer slows the publisher.
#[async_trait]
pub trait Consume<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Handles a single value.
    async fn on_value(&self, value: &T);

    /// Called once after end-of-stream, or right away if the topic was
    /// already closed when the consumer was attached.
    async fn on_close(&self) {}

    /// Returns the consumer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
