// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command registry, parameter coercion and dispatch.
//!
//! A request is a JSON object naming its command in the `req` field. The
//! [`Registry`] maps each command to the fields it requires and the handler
//! that serves it; the [`Dispatcher`] validates requests against that table
//! before invoking the handler.

mod coerce;
mod dispatch;
mod perspective;
mod schema;
mod validate;

use rectify_imaging::{ContainerError, TransformError};
use thiserror::Error;

pub use coerce::{stringify, CoercionError, FieldType};
pub use dispatch::{normalize_command, Dispatcher};
pub use schema::{CommandSpec, Field, Handler, Registry};
pub use validate::{validate, ValidationError};

/// Decoded request object, keyed by field name.
pub type Request = serde_json::Map<String, serde_json::Value>;

/// Field that names the command.
pub const COMMAND_FIELD: &str = "req";

/// Generic reply for failures whose detail stays in the log.
pub const UNEXPECTED_FAILURE: &str = "unexpected exception";

/// Errors from dispatching a single request.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("request has no command field")]
    MissingCommand,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ValidationError),

    #[error("invalid image: {0}")]
    InvalidImage(#[from] ContainerError),

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),
}

impl CommandError {
    /// Text sent back to the peer for this failure.
    pub fn peer_message(&self) -> String {
        match self {
            CommandError::MissingCommand => "no req".to_string(),
            CommandError::UnknownCommand(command) => format!("invalid command '{command}'"),
            CommandError::InvalidParameters(_) => "parameter is insufficient.".to_string(),
            CommandError::InvalidImage(_) => "image is not base64-encoded image".to_string(),
            CommandError::Transform(_) => UNEXPECTED_FAILURE.to_string(),
        }
    }

    /// Whether the failure is on our side rather than a bad request.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, CommandError::Transform(_))
    }
}

#[cfg(test)]
#[path = "../command_tests/mod.rs"]
mod tests;
