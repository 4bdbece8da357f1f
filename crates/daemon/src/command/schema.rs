// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use super::dispatch::normalize_name;
use super::{perspective, CommandError, FieldType, Request};

/// Serves one validated request, returning the response payload.
pub type Handler = fn(&Request) -> Result<Vec<u8>, CommandError>;

/// A required request field and the type it is coerced to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self { name: name.into(), ty }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }
}

/// Declared fields of a command, in validation order, plus its handler.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    fields: Vec<Field>,
    handler: Handler,
}

impl CommandSpec {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }
}

/// Immutable command table.
///
/// Built once at startup and shared read-only between connections. Names
/// are stored normalized (trimmed, lowercase).
#[derive(Debug, Clone)]
pub struct Registry {
    commands: HashMap<String, CommandSpec>,
}

impl Registry {
    /// A registry with no commands.
    pub fn empty() -> Self {
        Self { commands: HashMap::new() }
    }

    /// Add (or replace) a command.
    pub fn with_command(mut self, name: &str, fields: Vec<Field>, handler: Handler) -> Self {
        self.commands.insert(normalize_name(name), CommandSpec { fields, handler });
        self
    }

    /// Look up a command by its normalized name.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    /// The commands served by `rectifyd`.
    fn default() -> Self {
        Self::empty().with_command(perspective::NAME, perspective::fields(), perspective::handle)
    }
}
