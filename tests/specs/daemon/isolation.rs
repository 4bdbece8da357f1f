// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One slow or stalled peer never holds up another.

use std::time::{Duration, Instant};

use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::prelude::*;

#[tokio::test]
async fn stalled_peer_does_not_block_others() {
    let server = Server::start().await;

    // Connects and never sends a byte.
    let _stalled = server.connect().await;
    // Sends a partial prefix and stops.
    let mut half = server.connect().await;
    half.write_all(&[0, 0]).await.unwrap();

    let reply = tokio::time::timeout(
        Duration::from_secs(5),
        server.request_text(&json!({"req": "unknown"})),
    )
    .await
    .expect("request blocked behind stalled peers");

    assert_eq!(reply, "invalid command 'unknown'");
}

#[tokio::test]
async fn slow_peer_is_answered_after_read_timeout() {
    let server = Server::start().await;
    let mut stream = server.connect().await;

    stream.write_all(&[0, 0, 0, 50]).await.unwrap();
    stream.write_all(br#"{"req": "#).await.unwrap();
    let started = Instant::now();

    let reply = read_reply(&mut stream).await;

    assert_eq!(reply, b"invalid json data");
    assert!(started.elapsed() >= READ_TIMEOUT - Duration::from_millis(50));
}

#[tokio::test]
async fn silent_peers_are_answered_after_read_timeout() {
    let server = Server::start().await;
    let mut silent = server.connect().await;
    let mut half = server.connect().await;
    half.write_all(&[0, 0]).await.unwrap();
    let started = Instant::now();

    assert_eq!(read_reply(&mut silent).await, b"invalid prefix");
    assert_eq!(read_reply(&mut half).await, b"invalid prefix");
    assert!(started.elapsed() >= READ_TIMEOUT - Duration::from_millis(50));
}

#[tokio::test]
async fn stopped_server_refuses_new_connections() {
    let server = Server::start().await;
    assert_eq!(server.request_text(&json!({"req": "x"})).await, "invalid command 'x'");

    server.stop();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if tokio::net::TcpStream::connect(server.addr()).await.is_err() {
            break;
        }
        assert!(Instant::now() < deadline, "listener still accepting after stop");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
