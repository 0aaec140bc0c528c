//! # Broadcaster Example
//!
//! Two subscribers, three published values, then close.
//!
//! Each subscriber runs in its own task and prints what it receives until
//! end-of-stream; `main` waits for both before exiting.
//!
//! ## Run
//! ```bash
//! cargo run --example pubsub
//! ```

use std::sync::Arc;

use pubsub::Broadcaster;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let topic = Arc::new(Broadcaster::<String>::new());

    let Some(mut s1) = topic.subscribe().await else {
        anyhow::bail!("topic closed before sub 1 joined");
    };
    let sub1 = tokio::spawn(async move {
        loop {
            match s1.recv().await {
                Some(v) => println!("sub 1, value {v}"),
                None => {
                    println!("sub 1, exiting");
                    return;
                }
            }
        }
    });

    let Some(mut s2) = topic.subscribe().await else {
        anyhow::bail!("topic closed before sub 2 joined");
    };
    let sub2 = tokio::spawn(async move {
        while let Some(v) = s2.recv().await {
            println!("sub 2, value {v}");
        }
        println!("sub 2, exiting");
    });

    for v in ["one", "two", "three"] {
        topic.publish(v.to_string()).await;
    }
    topic.close().await;

    sub1.await?;
    sub2.await?;

    println!("complete");
    Ok(())
}
