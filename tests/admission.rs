//! Admission gates under concurrent load.

use std::time::{Duration, Instant};

mod common;

/// With status_slots=2 and a 50 ms per-request delay, 10 concurrent status
/// requests need at least 5 serialized batches.
#[tokio::test]
async fn status_gate_limits_concurrency_under_burst() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("dmx.sock");
    let _daemon = common::start_mock_daemon(&socket);

    let mut config = common::test_config(&socket);
    config.admission.status_slots = 2;
    config.status.delay_ms = 50;
    let (url, shutdown) = common::spawn_relay(config).await;

    let client = reqwest::Client::new();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let client = client.clone();
        let url = format!("{}/status", url);
        tasks.push(tokio::spawn(async move {
            client.get(&url).send().await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(250),
        "10 requests through a 2-slot gate finished in {:?}; the gate is not limiting",
        elapsed
    );

    shutdown.trigger();
}

/// The capacity-1 set gate serializes every write, but all of a burst's
/// requests still complete and each deliver exactly one command.
#[tokio::test]
async fn set_gate_serializes_but_starves_no_one() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("dmx.sock");
    let daemon = common::start_mock_daemon(&socket);
    let (url, shutdown) = common::spawn_relay(common::test_config(&socket)).await;

    let client = reqwest::Client::new();
    let mut tasks = Vec::new();
    for i in 0..20u32 {
        let client = client.clone();
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            let res = client
                .post(&url)
                .body(format!(r#"{{"{}":{}}}"#, i, i))
                .send()
                .await
                .unwrap();
            res.status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    tokio::time::sleep(Duration::from_millis(100)).await;
    let mut received = daemon.received().await;
    received.sort();
    assert_eq!(received.len(), 20, "every admitted request wrote once");

    let mut expected: Vec<String> = (0..20u32).map(|i| format!("{}:{}", i, i)).collect();
    expected.sort();
    assert_eq!(received, expected);

    shutdown.trigger();
}

/// Status and set gates are independent: saturating the set gate does not
/// delay status traffic.
#[tokio::test]
async fn gates_are_independent_per_route() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("dmx.sock");

    // daemon delayed long enough that a set request parks in the retry loop
    let _daemon = common::start_delayed_daemon(&socket, Duration::from_millis(200));

    let mut config = common::test_config(&socket);
    config.retry.max_attempts = 8;
    config.retry.base_delay_ms = 40;
    config.retry.max_delay_ms = 80;
    config.status.delay_ms = 10;
    let (url, shutdown) = common::spawn_relay(config).await;

    let client = reqwest::Client::new();

    // occupy the set gate
    let set_task = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move { client.post(&url).body(r#"{"1":1}"#).send().await })
    };

    tokio::time::sleep(Duration::from_millis(30)).await;

    // status answers promptly while the set request is still retrying
    let start = Instant::now();
    let res = client.get(format!("{}/status", url)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(
        start.elapsed() < Duration::from_millis(150),
        "status was held up by the set gate"
    );

    let res = set_task.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}
