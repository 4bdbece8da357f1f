// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image collaborators for the rectify daemon.
//!
//! `container` converts between `data:image/<format>;base64,<data>` text and
//! raw image bytes. `perspective` rectifies a quadrilateral region of an
//! image into an upright rectangle.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod container;
pub mod perspective;

pub use container::{ContainerError, ImageContainer};
pub use perspective::{transform, Point, TransformError};
