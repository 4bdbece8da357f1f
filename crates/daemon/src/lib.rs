// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rectify daemon library
//!
//! Serves one framed JSON request per TCP connection: the request names a
//! command, its fields are coerced against the command's schema, and the
//! handler's output is returned as a single framed response.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod command;
pub mod env;
pub mod lifecycle;
pub mod listener;
pub mod logging;

pub use command::{CommandError, Dispatcher, Registry, Request};
pub use lifecycle::{startup, Config, LifecycleError};
pub use listener::{ListenCtx, Listener};

#[cfg(test)]
mod test_fixtures;
