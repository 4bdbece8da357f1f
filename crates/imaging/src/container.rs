// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Textual image containers: `data:image/<format>;base64,<data>`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

const SCHEME: &str = "data:image/";
const ENCODING: &str = "base64,";

/// Raw image bytes paired with the format label they were tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContainer {
    pub bytes: Vec<u8>,
    pub format: String,
}

/// Reasons a container string is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("expected data:image/<format>;base64,<data>")]
    Pattern,

    #[error("invalid base64 data: {0}")]
    Base64(String),
}

/// Parse a container string into its bytes and format label.
///
/// Only the first line of the data section is considered. ASCII whitespace
/// inside it is ignored before base64 decoding.
pub fn decode(text: &str) -> Result<ImageContainer, ContainerError> {
    let rest = text.strip_prefix(SCHEME).ok_or(ContainerError::Pattern)?;
    let (format, rest) = rest.split_once(';').ok_or(ContainerError::Pattern)?;
    if format.is_empty() {
        return Err(ContainerError::Pattern);
    }
    let data = rest.strip_prefix(ENCODING).ok_or(ContainerError::Pattern)?;
    let data = data.split('\n').next().unwrap_or_default();
    if data.is_empty() {
        return Err(ContainerError::Pattern);
    }

    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64.decode(compact).map_err(|e| ContainerError::Base64(e.to_string()))?;

    Ok(ImageContainer { bytes, format: format.to_string() })
}

/// Wrap image bytes in a container string tagged with `format`.
pub fn encode(bytes: &[u8], format: &str) -> String {
    format!("{SCHEME}{format};{ENCODING}{}", BASE64.encode(bytes))
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
