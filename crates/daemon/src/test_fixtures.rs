// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for daemon unit tests.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};

use crate::command::Request;

/// A `width` x `height` gradient PNG wrapped in a data URI.
pub(crate) fn png_container(width: u32, height: u32) -> String {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 8) as u8, (y * 8) as u8, 128, 255])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    rectify_imaging::container::encode(&bytes, "png")
}

/// A perspective request selecting the 10x10 square at the origin.
pub(crate) fn perspective_request(command: &str) -> Value {
    json!({
        "req": command,
        "img": png_container(20, 20),
        "cdn_x1": 0, "cdn_y1": 0,
        "cdn_x2": 10, "cdn_y2": "0",
        "cdn_x3": "10", "cdn_y3": 10,
        "cdn_x4": 0, "cdn_y4": " 10 ",
    })
}

/// Unwrap a JSON object into a [`Request`].
pub(crate) fn request(value: Value) -> Request {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
