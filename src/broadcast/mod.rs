//! Broadcast core: the topic and its endpoints.
//!
//! ## Contents
//! - [`Broadcaster`] owns the endpoint list and the closed flag behind one `RwLock`
//! - [`Subscription`] read side of one endpoint, handed to a consumer
//! - `Endpoint` write side kept by the broadcaster (crate-private)
//!
//! ```text
//! Broadcaster ──► Endpoint ══(one slot + ack)══► Subscription ──► consumer
//! ```

mod broadcaster;
mod endpoint;
mod subscription;

pub use broadcaster::Broadcaster;
pub use subscription::Subscription;
