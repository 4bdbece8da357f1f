// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Malformed and rejected requests are answered with plain text.

use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::prelude::*;

#[tokio::test]
async fn unknown_command_reply_names_it() {
    let server = Server::start().await;

    let reply = server.request_text(&json!({"req": "unknown"})).await;

    assert!(reply.contains("unknown"), "reply: {reply}");
}

#[tokio::test]
async fn peer_closing_immediately_gets_invalid_prefix() {
    let server = Server::start().await;
    let mut stream = server.connect().await;

    stream.shutdown().await.unwrap();

    assert_eq!(read_reply(&mut stream).await, b"invalid prefix");
}

#[tokio::test]
async fn garbage_payload_gets_invalid_json() {
    let server = Server::start().await;

    assert_eq!(server.request(b"\x00\xffnot json").await, b"invalid json data");
}

#[tokio::test]
async fn missing_fields_get_insufficient_parameters() {
    let server = Server::start().await;

    let request = json!({"req": "perspective", "img": "data:image/png;base64,AA=="});

    let reply = server.request_text(&request).await;

    assert_eq!(reply, "parameter is insufficient.");
}

#[tokio::test]
async fn non_container_image_is_rejected() {
    let server = Server::start().await;
    let request = perspective_request("perspective", "not an image".to_string(), [(0, 0); 4]);

    assert_eq!(server.request_text(&request).await, "image is not base64-encoded image");
}

#[tokio::test]
async fn undecodable_image_bytes_get_generic_failure() {
    let server = Server::start().await;
    let request = perspective_request(
        "perspective",
        "data:image/png;base64,aGVsbG8=".to_string(),
        [(0, 0), (4, 0), (4, 4), (0, 4)],
    );

    assert_eq!(server.request_text(&request).await, "unexpected exception");
}
