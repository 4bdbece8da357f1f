// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Perspective rectification.
//!
//! Given four corners of a quadrilateral in the source image (top-left,
//! top-right, bottom-right, bottom-left), produce an upright rectangle whose
//! sides are the longer of each pair of opposite edges. Every output pixel is
//! mapped back through a homography and bilinearly sampled.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

/// Integer pixel coordinate `(x, y)`.
pub type Point = (i64, i64);

/// Largest output image, in pixels, that [`transform`] will allocate.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 26;

/// Errors from [`transform`].
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("4 coordinates are required, got {0}")]
    CornerCount(usize),

    #[error("unsupported image format {0:?}")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("corners do not span a quadrilateral")]
    Degenerate,

    #[error("output of {width}x{height} exceeds {MAX_OUTPUT_PIXELS} pixels")]
    TooLarge { width: u64, height: u64 },
}

/// Rectify the quadrilateral `corners` of the encoded image `bytes` and
/// re-encode the result as `format`.
pub fn transform(bytes: &[u8], format: &str, corners: &[Point]) -> Result<Vec<u8>, TransformError> {
    let quad: [Point; 4] =
        corners.try_into().map_err(|_| TransformError::CornerCount(corners.len()))?;
    let output_format = ImageFormat::from_extension(format)
        .ok_or_else(|| TransformError::UnsupportedFormat(format.to_string()))?;

    let source = image::load_from_memory(bytes).map_err(TransformError::Decode)?.to_rgba8();
    let warped = warp(&source, quad)?;

    let output = match output_format {
        // JPEG carries no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(warped).to_rgb8()),
        _ => DynamicImage::ImageRgba8(warped),
    };

    let mut encoded = Vec::new();
    output.write_to(&mut Cursor::new(&mut encoded), output_format).map_err(TransformError::Encode)?;
    Ok(encoded)
}

fn warp(source: &RgbaImage, quad: [Point; 4]) -> Result<RgbaImage, TransformError> {
    let src = quad.map(|(x, y)| (x as f64, y as f64));

    let width = distance(src[0], src[1]).max(distance(src[2], src[3]));
    let height = distance(src[0], src[3]).max(distance(src[1], src[2]));
    let dst = [(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)];

    let (out_w, out_h) = output_size(width, height)?;

    // Maps output coordinates back into the source image.
    let homography = Homography::solve(dst, src)?;
    debug!(out_w, out_h, "rectifying quadrilateral");

    Ok(RgbaImage::from_fn(out_w, out_h, |x, y| {
        let (sx, sy) = homography.apply(x as f64, y as f64);
        sample_bilinear(source, sx, sy)
    }))
}

/// Truncated output dimensions, rejected before allocation when too large.
fn output_size(width: f64, height: f64) -> Result<(u32, u32), TransformError> {
    // `as` saturates, so huge or non-finite edges stay bounded here.
    let w = (width as u64).max(1);
    let h = (height as u64).max(1);
    let too_large = || TransformError::TooLarge { width: w, height: h };

    let pixels = w.checked_mul(h).ok_or_else(too_large)?;
    if pixels > MAX_OUTPUT_PIXELS {
        return Err(too_large());
    }
    Ok((u32::try_from(w).map_err(|_| too_large())?, u32::try_from(h).map_err(|_| too_large())?))
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Projective map with the bottom-right coefficient fixed at 1.
struct Homography([f64; 8]);

impl Homography {
    /// Solve for the homography taking each `from[i]` to `to[i]`.
    fn solve(from: [(f64, f64); 4], to: [(f64, f64); 4]) -> Result<Self, TransformError> {
        let mut system = [[0.0f64; 9]; 8];
        for (i, ((x, y), (u, v))) in from.into_iter().zip(to).enumerate() {
            system[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u, u];
            system[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v, v];
        }
        gaussian_eliminate(&mut system).map(Homography)
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let h = &self.0;
        let w = h[6] * x + h[7] * y + 1.0;
        ((h[0] * x + h[1] * y + h[2]) / w, (h[3] * x + h[4] * y + h[5]) / w)
    }
}

/// Solve an 8x8 augmented system in place with partial pivoting.
fn gaussian_eliminate(m: &mut [[f64; 9]; 8]) -> Result<[f64; 8], TransformError> {
    const EPSILON: f64 = 1e-10;

    for col in 0..8 {
        let pivot = (col..8)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() < EPSILON {
            return Err(TransformError::Degenerate);
        }
        m.swap(col, pivot);

        for row in 0..8 {
            if row == col {
                continue;
            }
            let factor = m[row][col] / m[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..9 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut solution = [0.0; 8];
    for (i, value) in solution.iter_mut().enumerate() {
        *value = m[i][8] / m[i][i];
    }
    Ok(solution)
}

fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (w, h) = (image.width() as i64, image.height() as i64);
    if !x.is_finite() || !y.is_finite() {
        return Rgba([0, 0, 0, 0]);
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let pixel = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        image.get_pixel(px as u32, py as u32).0.map(f64::from)
    };

    let (p00, p10) = (pixel(x0, y0), pixel(x0 + 1, y0));
    let (p01, p11) = (pixel(x0, y0 + 1), pixel(x0 + 1, y0 + 1));

    let mut out = [0u8; 4];
    for (c, channel) in out.iter_mut().enumerate() {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        *channel = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

#[cfg(test)]
#[path = "perspective_tests.rs"]
mod tests;
