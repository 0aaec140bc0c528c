//! # ConsumerSet Example
//!
//! Same flow as `pubsub`, driven by [`ConsumerSet`] with two [`LogWriter`]s
//! and a custom counting consumer.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example consumers --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use pubsub::{Broadcaster, Consume, ConsumerSet, LogWriter};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Counter {
    values: AtomicU64,
}

#[async_trait]
impl Consume<String> for Counter {
    async fn on_value(&self, _value: &String) {
        self.values.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let topic = Broadcaster::<String>::new();
    let counter = Arc::new(Counter::default());

    let consumers: Vec<Arc<dyn Consume<String>>> = vec![
        Arc::new(LogWriter::new("sub1")),
        Arc::new(LogWriter::new("sub2")),
        Arc::clone(&counter) as _,
    ];
    let set = ConsumerSet::attach(&topic, consumers).await;

    for v in ["one", "two", "three"] {
        topic.publish(v.to_string()).await;
    }
    topic.close().await;
    set.join().await;

    println!("complete ({} values counted)", counter.values.load(Ordering::Relaxed));
    Ok(())
}
