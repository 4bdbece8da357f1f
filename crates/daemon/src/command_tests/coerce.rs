// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use proptest::prelude::*;
use serde_json::{json, Value};

use super::*;

#[yare::parameterized(
    integer          = { json!(12), 12 },
    negative         = { json!(-7), -7 },
    numeric_string   = { json!("12"), 12 },
    padded_string    = { json!("  42\n"), 42 },
    signed_string    = { json!("+5"), 5 },
    negative_string  = { json!("-300"), -300 },
    underscores      = { json!("1_000"), 1000 },
    float_truncates  = { json!(3.9), 3 },
    negative_float   = { json!(-3.9), -3 },
    boolean_true     = { json!(true), 1 },
    boolean_false    = { json!(false), 0 },
)]
fn int_accepts(raw: Value, expected: i64) {
    assert_eq!(FieldType::Int.coerce(&raw), Ok(Value::from(expected)));
}

#[yare::parameterized(
    word            = { json!("ten") },
    decimal_string  = { json!("3.5") },
    empty_string    = { json!("") },
    bare_sign       = { json!("-") },
    double_under    = { json!("1__0") },
    leading_under   = { json!("_1") },
    inner_space     = { json!("1 0") },
    null            = { json!(null) },
    array           = { json!([1]) },
    object          = { json!({"x": 1}) },
    too_large       = { json!("99999999999999999999") },
    huge_number     = { json!(1e300) },
)]
fn int_rejects(raw: Value) {
    assert!(FieldType::Int.coerce(&raw).is_err(), "accepted {raw}");
}

#[yare::parameterized(
    string   = { json!("data:image/png;base64,AA=="), "data:image/png;base64,AA==" },
    integer  = { json!(7), "7" },
    float    = { json!(2.5), "2.5" },
    boolean_true   = { json!(true), "True" },
    boolean_false  = { json!(false), "False" },
    null     = { json!(null), "None" },
    array    = { json!([1, "a"]), "[1,\"a\"]" },
    object   = { json!({"x": 1}), "{\"x\":1}" },
)]
fn text_accepts_any_value(raw: Value, expected: &str) {
    assert_eq!(FieldType::Text.coerce(&raw), Ok(Value::from(expected)));
}

#[test]
fn error_names_target_type() {
    let err = FieldType::Int.coerce(&json!(null)).unwrap_err();

    assert_eq!(err.to_string(), "null cannot be converted to int");
}

proptest! {
    #[test]
    fn int_strings_coerce_to_their_value(n in any::<i64>()) {
        prop_assert_eq!(FieldType::Int.coerce(&Value::from(n.to_string())), Ok(Value::from(n)));
    }
}
