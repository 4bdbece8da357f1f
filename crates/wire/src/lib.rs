// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message framing for the rectify request/response protocol.
//!
//! Wire format: 4-byte length prefix (big-endian) + payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod wire;

pub use wire::{
    encode_frame, read_frame, write_frame, ProtocolError, ReadOutcome, DEFAULT_READ_TIMEOUT,
    PREFIX_LEN,
};

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
