// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;
use crate::test_fixtures::request;

fn point_fields() -> Vec<Field> {
    vec![Field::text("label"), Field::int("x"), Field::int("y")]
}

#[test]
fn coerced_values_replace_raw_values() {
    let mut req = request(json!({"label": 5, "x": "12", "y": 3.0, "extra": "kept"}));

    validate(&mut req, &point_fields()).unwrap();

    assert_eq!(req["label"], json!("5"));
    assert_eq!(req["x"], json!(12));
    assert_eq!(req["y"], json!(3));
    assert_eq!(req["extra"], json!("kept"));
}

#[test]
fn missing_field_fails() {
    let mut req = request(json!({"label": "a", "x": 1}));

    assert_eq!(
        validate(&mut req, &point_fields()),
        Err(ValidationError::Missing("y".to_string()))
    );
}

#[test]
fn first_failure_in_declared_order_is_reported() {
    let mut req = request(json!({"label": "a", "x": "one", "y": "two"}));

    let err = validate(&mut req, &point_fields()).unwrap_err();

    assert!(matches!(err, ValidationError::Coercion { ref field, .. } if field == "x"));
}

#[test]
fn empty_schema_accepts_anything() {
    let mut req = request(json!({"req": "noop"}));

    assert!(validate(&mut req, &[]).is_ok());
}
