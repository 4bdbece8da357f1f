// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end perspective requests.

use image::ImageFormat;
use serde_json::json;

use crate::prelude::*;

const SQUARE: [(i64, i64); 4] = [(0, 0), (10, 0), (10, 10), (0, 10)];

#[tokio::test]
async fn uppercase_command_returns_png_container() {
    let server = Server::start().await;
    let image = image_container(32, 32, ImageFormat::Png, "png");
    let request = perspective_request("PERSPECTIVE", image, SQUARE);

    let reply = server.request_text(&request).await;

    assert!(reply.starts_with("data:image/png;base64,"), "reply: {reply}");
    let decoded = rectify_imaging::container::decode(&reply).unwrap();
    let img = image::load_from_memory(&decoded.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (10, 10));
}

#[tokio::test]
async fn textual_coordinates_are_accepted() {
    let server = Server::start().await;
    let request = json!({
        "req": "perspective",
        "img": image_container(40, 30, ImageFormat::Png, "png"),
        "cdn_x1": "5", "cdn_y1": "5",
        "cdn_x2": "25", "cdn_y2": "5",
        "cdn_x3": "25", "cdn_y3": "20",
        "cdn_x4": "5", "cdn_y4": "20",
    });

    let reply = server.request_text(&request).await;

    let decoded = rectify_imaging::container::decode(&reply).unwrap();
    let img = image::load_from_memory(&decoded.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (20, 15));
}

#[tokio::test]
async fn jpeg_label_is_preserved() {
    let server = Server::start().await;
    let image = image_container(24, 24, ImageFormat::Jpeg, "jpeg");
    let request = perspective_request("perspective", image, SQUARE);

    let reply = server.request_text(&request).await;

    let decoded = rectify_imaging::container::decode(&reply).unwrap();
    assert_eq!(decoded.format, "jpeg");
    assert_eq!(image::guess_format(&decoded.bytes).unwrap(), ImageFormat::Jpeg);
}

#[tokio::test]
async fn concurrent_requests_are_served_independently() {
    let server = Server::start().await;
    let image = image_container(32, 32, ImageFormat::Png, "png");

    let mut tasks = Vec::new();
    for i in 0..8i64 {
        let request = if i % 2 == 0 {
            let quad = [(0, 0), (8 + i, 0), (8 + i, 8), (0, 8)];
            perspective_request("perspective", image.clone(), quad)
        } else {
            json!({"req": format!("nope{i}")})
        };
        let addr = server.addr();
        tasks.push(tokio::spawn(async move {
            let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
            let frame = rectify_wire::encode_frame(request.to_string().as_bytes()).unwrap();
            tokio::io::AsyncWriteExt::write_all(&mut stream, &frame).await.unwrap();
            (i, String::from_utf8(read_reply(&mut stream).await).unwrap())
        }));
    }

    for task in tasks {
        let (i, reply) = task.await.unwrap();
        if i % 2 == 0 {
            let decoded = rectify_imaging::container::decode(&reply).unwrap();
            let width = image::load_from_memory(&decoded.bytes).unwrap().width();
            assert_eq!(i64::from(width), 8 + i);
        } else {
            assert_eq!(reply, format!("invalid command 'nope{i}'"));
        }
    }
}
