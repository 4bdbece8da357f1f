// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs.

use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use rectify_daemon::{startup, Config};
use rectify_wire::{encode_frame, read_frame, ReadOutcome};
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

/// Per-read timeout used by spec servers.
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// A listener on an ephemeral loopback port, stopped on drop.
pub struct Server {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl Server {
    pub async fn start() -> Self {
        let config = Config {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            read_timeout: READ_TIMEOUT,
            log_file: None,
        };
        let listener = startup(&config).await.expect("startup failed");
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        tokio::spawn(listener.run(shutdown.clone()));
        Self { addr, shutdown }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub async fn connect(&self) -> TcpStream {
        TcpStream::connect(self.addr).await.expect("connect failed")
    }

    /// Send one framed payload and return the framed reply.
    pub async fn request(&self, payload: &[u8]) -> Vec<u8> {
        let mut stream = self.connect().await;
        stream.write_all(&encode_frame(payload).unwrap()).await.unwrap();
        read_reply(&mut stream).await
    }

    pub async fn request_text(&self, json: &Value) -> String {
        String::from_utf8(self.request(json.to_string().as_bytes()).await).unwrap()
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub async fn read_reply(stream: &mut TcpStream) -> Vec<u8> {
    match read_frame(stream, Duration::from_secs(10)).await.unwrap() {
        ReadOutcome::Complete(payload) => payload,
        other => panic!("incomplete reply: {other:?}"),
    }
}

/// Encode a gradient image of the given size as a data URI.
pub fn image_container(width: u32, height: u32, format: ImageFormat, label: &str) -> String {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 4) as u8, (y * 4) as u8, 90, 255])
    });
    let img = image::DynamicImage::ImageRgba8(img);
    let img = match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    rectify_imaging::container::encode(&bytes, label)
}

pub fn perspective_request(command: &str, img: String, quad: [(i64, i64); 4]) -> Value {
    let [(x1, y1), (x2, y2), (x3, y3), (x4, y4)] = quad;
    json!({
        "req": command,
        "img": img,
        "cdn_x1": x1, "cdn_y1": y1,
        "cdn_x2": x2, "cdn_y2": y2,
        "cdn_x3": x3, "cdn_y3": y3,
        "cdn_x4": x4, "cdn_y4": y4,
    })
}
