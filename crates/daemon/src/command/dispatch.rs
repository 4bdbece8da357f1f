// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use tracing::{debug, warn};

use super::{stringify, validate, CommandError, Registry, Request, COMMAND_FIELD};

/// Routes requests to the handler registered for their command.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate `request` against its command and run the handler.
    pub fn dispatch(&self, mut request: Request) -> Result<Vec<u8>, CommandError> {
        let command =
            normalize_command(request.get(COMMAND_FIELD).ok_or(CommandError::MissingCommand)?);
        debug!(command = %command, "request command");

        let entry = self
            .registry
            .get(&command)
            .ok_or_else(|| CommandError::UnknownCommand(command.clone()))?;

        validate(&mut request, entry.fields())?;
        (entry.handler())(&request)
    }

    /// Like [`Dispatcher::dispatch`], with failures rendered as peer text.
    pub fn respond(&self, request: Request) -> Vec<u8> {
        match self.dispatch(request) {
            Ok(payload) => payload,
            Err(e) => {
                if e.is_unexpected() {
                    warn!(error = %e, "unexpected failure while handling request");
                } else {
                    debug!(error = %e, "request rejected");
                }
                e.peer_message().into_bytes()
            }
        }
    }
}

/// Stringify, trim and lowercase a raw command value.
pub fn normalize_command(raw: &Value) -> String {
    normalize_name(&stringify(raw))
}

pub(super) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
