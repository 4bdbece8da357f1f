// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use super::{CoercionError, Field, Request};

/// First field that failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing field {0:?}")]
    Missing(String),

    #[error("field {field:?}: {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },
}

/// Check that every declared field is present and coercible, replacing each
/// value with its coerced form.
///
/// Fields are processed in declared order and the first failure stops
/// validation. On failure the request may be partially rewritten and should
/// be discarded.
pub fn validate(request: &mut Request, fields: &[Field]) -> Result<(), ValidationError> {
    for field in fields {
        let value = request
            .get_mut(field.name())
            .ok_or_else(|| ValidationError::Missing(field.name().to_string()))?;
        *value = field.ty().coerce(value).map_err(|source| ValidationError::Coercion {
            field: field.name().to_string(),
            source,
        })?;
    }
    Ok(())
}
