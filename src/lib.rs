//! # pubsub
//!
//! **pubsub** is an in-process publish/subscribe broadcaster for async Rust.
//!
//! A single publisher pushes values into a [`Broadcaster`]; every
//! [`Subscription`] receives each value published after it joined, in publish
//! order, until the broadcaster is closed.
//!
//! ## Architecture
//! ```text
//!                 publish(value)
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │  Broadcaster<T>                                 │
//! │  RwLock { endpoints: [E1, E2, ... EN], closed } │
//! └──────┬─────────────────┬─────────────────┬──────┘
//!        │ 1st             │ 2nd             │ Nth   (sequential, rendezvous)
//!        ▼                 ▼                 ▼
//!   Subscription 1    Subscription 2    Subscription N
//!        │                 │                 │
//!        ▼                 ▼                 ▼
//!    consumer task     consumer task     consumer task
//! ```
//!
//! ### Lifecycle
//! ```text
//! Open ── subscribe() ──► endpoint appended
//!  │  ── publish(v)   ──► v delivered to every endpoint, one after another
//!  │
//!  └── close() ──► Closed (terminal)
//!                   ├─ every endpoint observes end-of-stream once
//!                   ├─ subscribe() returns None
//!                   └─ publish(v) is ignored
//! ```
//!
//! ## Delivery rules
//! - **Rendezvous**: with the default [`Config`], `publish` hands the value to
//!   each consumer in turn and waits until that consumer has taken it.
//! - **Backpressure**: a subscriber that stops reading stalls `publish`, and
//!   with it `subscribe`/`close`, which need the exclusive lock.
//! - **No replay**: late subscribers only see values published after they joined.
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                   |
//! |-------------------|----------------------------------------------------------|--------------------------------------|
//! | **Broadcast**     | Subscribe, publish and close a single topic.             | [`Broadcaster`], [`Subscription`]    |
//! | **Consumers**     | Task-per-subscriber workers with panic isolation.        | [`Consume`], [`ConsumerSet`]         |
//! | **Errors**        | Typed errors for non-blocking receive.                   | [`TryRecvError`]                     |
//! | **Configuration** | Endpoint capacity (rendezvous or bounded).               | [`Config`]                           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` consumer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use pubsub::Broadcaster;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let topic = Broadcaster::<String>::new();
//!     let mut sub = topic.subscribe().await.expect("topic is open");
//!
//!     let reader = tokio::spawn(async move {
//!         let mut seen = Vec::new();
//!         while let Some(v) = sub.recv().await {
//!             seen.push(v);
//!         }
//!         seen
//!     });
//!
//!     topic.publish("one".to_string()).await;
//!     topic.publish("two".to_string()).await;
//!     topic.close().await;
//!
//!     assert_eq!(reader.await.unwrap(), vec!["one", "two"]);
//! }
//! ```
mod broadcast;
mod config;
mod consumers;
mod error;

// ---- Public re-exports ----

pub use broadcast::{Broadcaster, Subscription};
pub use config::Config;
pub use consumers::{Consume, ConsumerSet};
pub use error::TryRecvError;

// Optional: expose a simple built-in logging consumer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use consumers::LogWriter;
