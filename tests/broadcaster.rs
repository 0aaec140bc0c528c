use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use pubsub::{Broadcaster, Config, TryRecvError};
use tokio::task::JoinHandle;
use tokio::time::timeout;

const STALL: Duration = Duration::from_millis(50);
const DEADLINE: Duration = Duration::from_secs(5);

fn collect<T: Send + 'static>(mut sub: pubsub::Subscription<T>) -> JoinHandle<Vec<T>> {
    tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Some(v) = sub.recv().await {
            seen.push(v);
        }
        seen
    })
}

#[tokio::test]
async fn test_two_subscribers_receive_all_values_in_order() {
    let topic = Broadcaster::<String>::new();
    let s1 = collect(topic.subscribe().await.expect("open"));
    let s2 = collect(topic.subscribe().await.expect("open"));

    for v in ["one", "two", "three"] {
        topic.publish(v.to_string()).await;
    }
    topic.close().await;

    let s1 = timeout(DEADLINE, s1).await.unwrap().unwrap();
    let s2 = timeout(DEADLINE, s2).await.unwrap().unwrap();
    assert_eq!(s1, vec!["one", "two", "three"]);
    assert_eq!(s2, vec!["one", "two", "three"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_long_sequence_has_no_gaps_or_duplicates() {
    let topic = Broadcaster::<u32>::new();
    let readers: Vec<_> = {
        let mut v = Vec::new();
        for _ in 0..3 {
            v.push(collect(topic.subscribe().await.expect("open")));
        }
        v
    };

    for i in 0..500 {
        topic.publish(i).await;
    }
    topic.close().await;

    let expected: Vec<u32> = (0..500).collect();
    for reader in readers {
        assert_eq!(timeout(DEADLINE, reader).await.unwrap().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_subscribe_after_close_returns_none() {
    let topic = Broadcaster::<String>::new();
    topic.close().await;

    assert!(topic.subscribe().await.is_none());
    assert!(topic.is_closed().await);
    assert_eq!(topic.subscriber_count().await, 0);
}

#[tokio::test]
async fn test_publish_after_close_is_ignored() {
    let topic = Broadcaster::<String>::new();
    let mut sub = topic.subscribe().await.expect("open");
    topic.close().await;

    timeout(DEADLINE, topic.publish("x".to_string()))
        .await
        .expect("late publish must not block");
    assert_eq!(sub.recv().await, None);
}

#[tokio::test]
async fn test_close_with_no_subscribers_then_publish() {
    let topic = Broadcaster::<String>::new();
    topic.close().await;
    assert!(topic.subscribe().await.is_none());
    timeout(DEADLINE, topic.publish("x".to_string()))
        .await
        .expect("late publish must not block");
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let topic = Broadcaster::<u8>::new();
    let mut sub = topic.subscribe().await.expect("open");

    topic.close().await;
    topic.close().await;
    topic.close().await;

    assert_eq!(sub.recv().await, None);
    assert!(sub.is_terminated());
    assert_eq!(sub.recv().await, None);
    assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
}

#[tokio::test]
async fn test_late_subscriber_sees_only_later_values() {
    let topic = Broadcaster::<u32>::new();
    let early = collect(topic.subscribe().await.expect("open"));

    topic.publish(1).await;
    topic.publish(2).await;

    let late = collect(topic.subscribe().await.expect("open"));
    topic.publish(3).await;
    topic.close().await;

    assert_eq!(early.await.unwrap(), vec![1, 2, 3]);
    assert_eq!(late.await.unwrap(), vec![3]);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_skip_or_duplicate() {
    let topic = Broadcaster::<u32>::new();
    let mut slow_sub = topic.subscribe().await.expect("open");
    let fast = collect(topic.subscribe().await.expect("open"));

    let slow = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Some(v) = slow_sub.recv().await {
            tokio::time::sleep(Duration::from_millis(2)).await;
            seen.push(v);
        }
        seen
    });

    for i in 0..20 {
        topic.publish(i).await;
    }
    topic.close().await;

    let expected: Vec<u32> = (0..20).collect();
    assert_eq!(slow.await.unwrap(), expected);
    assert_eq!(fast.await.unwrap(), expected);
}

#[tokio::test]
async fn test_idle_subscriber_blocks_publish_until_it_reads() {
    let topic = Arc::new(Broadcaster::<u8>::new());
    let mut sub = topic.subscribe().await.expect("open");

    let mut publisher = {
        let topic = Arc::clone(&topic);
        tokio::spawn(async move { topic.publish(7).await })
    };

    assert!(
        timeout(STALL, &mut publisher).await.is_err(),
        "publish must wait for the subscriber"
    );

    assert_eq!(sub.recv().await, Some(7));
    timeout(DEADLINE, publisher).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_stalled_publish_blocks_subscribe_and_close() {
    let topic = Arc::new(Broadcaster::<u8>::new());
    let mut sub = topic.subscribe().await.expect("open");

    let publisher = {
        let topic = Arc::clone(&topic);
        tokio::spawn(async move { topic.publish(1).await })
    };
    tokio::time::sleep(STALL).await;

    assert!(timeout(STALL, topic.subscribe()).await.is_err());
    assert!(timeout(STALL, topic.close()).await.is_err());

    assert_eq!(sub.recv().await, Some(1));
    publisher.await.unwrap();

    topic.close().await;
    assert_eq!(sub.recv().await, None);
}

#[tokio::test]
async fn test_dropped_subscription_is_skipped() {
    let topic = Broadcaster::<u8>::new();
    let dropped = topic.subscribe().await.expect("open");
    let mut kept = topic.subscribe().await.expect("open");
    drop(dropped);

    assert_eq!(topic.subscriber_count().await, 1);

    let (_, got) = timeout(DEADLINE, async { tokio::join!(topic.publish(9), kept.recv()) })
        .await
        .expect("dropped subscription must not stall publish");
    assert_eq!(got, Some(9));
}

#[tokio::test]
async fn test_subscription_ids_follow_subscription_order() {
    let topic = Broadcaster::<u8>::new();
    let a = topic.subscribe().await.expect("open");
    let b = topic.subscribe().await.expect("open");
    assert!(a.id() < b.id());
}

#[tokio::test]
async fn test_try_recv_reports_empty_then_closed() {
    let topic = Broadcaster::<u8>::with_config(Config::bounded(2));
    let mut sub = topic.subscribe().await.expect("open");

    assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    topic.publish(5).await;
    assert_eq!(sub.try_recv(), Ok(5));
    assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));

    topic.close().await;
    assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
}

#[tokio::test]
async fn test_bounded_endpoint_blocks_only_when_full() {
    let topic = Broadcaster::<u32>::with_config(Config::bounded(3));
    let mut sub = topic.subscribe().await.expect("open");

    for i in 0..3 {
        timeout(STALL, topic.publish(i))
            .await
            .expect("queue has room");
    }
    assert!(
        timeout(STALL, topic.publish(3)).await.is_err(),
        "full queue must block publish"
    );

    topic.close().await;
    assert_eq!(sub.recv().await, Some(0));
    assert_eq!(sub.recv().await, Some(1));
    assert_eq!(sub.recv().await, Some(2));
    assert_eq!(sub.recv().await, None);
}

#[tokio::test]
async fn test_subscription_as_stream() {
    let topic = Broadcaster::<u32>::new();
    let sub = topic.subscribe().await.expect("open");
    let reader = tokio::spawn(async move { sub.map(|v| v * 10).collect::<Vec<_>>().await });

    topic.publish(1).await;
    topic.publish(2).await;
    topic.close().await;

    assert_eq!(reader.await.unwrap(), vec![10, 20]);
}

#[tokio::test]
async fn test_try_recv_releases_stalled_rendezvous_publish() {
    let topic = Arc::new(Broadcaster::<u8>::new());
    let mut sub = topic.subscribe().await.expect("open");
    assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));

    let mut publisher = {
        let topic = Arc::clone(&topic);
        tokio::spawn(async move { topic.publish(4).await })
    };
    assert!(
        timeout(STALL, &mut publisher).await.is_err(),
        "publish must wait for the subscriber"
    );

    assert_eq!(sub.try_recv(), Ok(4));
    timeout(DEADLINE, publisher).await.unwrap().unwrap();
    assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));

    topic.close().await;
    assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_publishes_share_the_read_lock() {
    let topic = Arc::new(Broadcaster::<u8>::new());
    let mut sub = topic.subscribe().await.expect("open");

    let publishers: Vec<_> = [1u8, 2]
        .into_iter()
        .map(|v| {
            let topic = Arc::clone(&topic);
            tokio::spawn(async move { topic.publish(v).await })
        })
        .collect();

    let mut got = vec![
        timeout(DEADLINE, sub.recv()).await.unwrap().unwrap(),
        timeout(DEADLINE, sub.recv()).await.unwrap().unwrap(),
    ];
    for publisher in publishers {
        timeout(DEADLINE, publisher).await.unwrap().unwrap();
    }
    got.sort_unstable();
    assert_eq!(got, vec![1, 2]);

    topic.close().await;
    assert_eq!(sub.recv().await, None);
}
