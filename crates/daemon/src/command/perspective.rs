// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `perspective` command: rectify a quadrilateral of an embedded image.

use rectify_imaging::{container, transform, Point};
use serde_json::Value;
use tracing::debug;

use super::{CommandError, Field, Request, ValidationError};

pub(super) const NAME: &str = "perspective";

const IMAGE: &str = "img";

/// Corner fields in quad order: top-left, top-right, bottom-right, bottom-left.
const CORNERS: [(&str, &str); 4] = [
    ("cdn_x1", "cdn_y1"),
    ("cdn_x2", "cdn_y2"),
    ("cdn_x3", "cdn_y3"),
    ("cdn_x4", "cdn_y4"),
];

pub(super) fn fields() -> Vec<Field> {
    std::iter::once(Field::text(IMAGE))
        .chain(CORNERS.iter().flat_map(|&(x, y)| [Field::int(x), Field::int(y)]))
        .collect()
}

pub(super) fn handle(request: &Request) -> Result<Vec<u8>, CommandError> {
    let text = request
        .get(IMAGE)
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::Missing(IMAGE.to_string()))?;
    let image = container::decode(text)?;

    let corners = CORNERS
        .iter()
        .map(|&(x, y)| Ok((int_field(request, x)?, int_field(request, y)?)))
        .collect::<Result<Vec<Point>, CommandError>>()?;
    debug!(format = %image.format, bytes = image.bytes.len(), ?corners, "perspective");

    let rectified = transform(&image.bytes, &image.format, &corners)?;
    Ok(container::encode(&rectified, &image.format).into_bytes())
}

fn int_field(request: &Request, name: &str) -> Result<i64, CommandError> {
    request
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| ValidationError::Missing(name.to_string()).into())
}
