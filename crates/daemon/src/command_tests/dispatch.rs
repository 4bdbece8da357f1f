// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;
use crate::test_fixtures::{perspective_request, request};

fn echo_x(request: &Request) -> Result<Vec<u8>, CommandError> {
    Ok(request["x"].to_string().into_bytes())
}

fn echo_dispatcher() -> Dispatcher {
    Dispatcher::new(Registry::empty().with_command(" Echo ", vec![Field::int("x")], echo_x))
}

#[test]
fn default_registry_serves_perspective() {
    let registry = Registry::default();

    assert_eq!(registry.names(), vec!["perspective"]);
    let fields: Vec<&str> =
        registry.get("perspective").unwrap().fields().iter().map(Field::name).collect();
    assert_eq!(
        fields,
        ["img", "cdn_x1", "cdn_y1", "cdn_x2", "cdn_y2", "cdn_x3", "cdn_y3", "cdn_x4", "cdn_y4"]
    );
}

#[test]
fn registered_names_are_normalized() {
    let dispatcher = echo_dispatcher();

    assert!(dispatcher.registry().contains("echo"));
    assert!(!dispatcher.registry().contains(" Echo "));
}

#[yare::parameterized(
    lower    = { json!("echo") },
    upper    = { json!("ECHO") },
    padded   = { json!("\t echo  ") },
)]
fn command_lookup_is_normalized(command: serde_json::Value) {
    let reply = echo_dispatcher().dispatch(request(json!({"req": command, "x": "41"}))).unwrap();

    assert_eq!(reply, b"41");
}

#[test]
fn non_string_command_is_stringified() {
    assert_eq!(normalize_command(&json!(12)), "12");
    assert_eq!(normalize_command(&json!(true)), "true");
    assert_eq!(normalize_command(&json!(null)), "none");
}

#[test]
fn null_command_is_unknown_none() {
    let reply = echo_dispatcher().respond(request(json!({"req": null})));

    assert_eq!(reply, b"invalid command 'none'");
}

#[test]
fn missing_command_fails() {
    let err = echo_dispatcher().dispatch(request(json!({"x": 1}))).unwrap_err();

    assert!(matches!(err, CommandError::MissingCommand));
}

#[test]
fn unknown_command_carries_normalized_name() {
    let err = echo_dispatcher().dispatch(request(json!({"req": " Unknown "}))).unwrap_err();

    assert!(matches!(err, CommandError::UnknownCommand(ref name) if name == "unknown"));
}

#[test]
fn invalid_parameters_skip_the_handler() {
    let reply = echo_dispatcher().respond(request(json!({"req": "echo", "x": "nope"})));

    assert_eq!(reply, b"parameter is insufficient.");
}

#[test]
fn perspective_reencodes_in_input_format() {
    let request = request(perspective_request("perspective"));

    let reply = Dispatcher::default().dispatch(request).unwrap();

    let decoded = rectify_imaging::container::decode(std::str::from_utf8(&reply).unwrap()).unwrap();
    assert_eq!(decoded.format, "png");
    assert_eq!(image::load_from_memory(&decoded.bytes).unwrap().width(), 10);
}

#[test]
fn perspective_rejects_corrupt_base64() {
    let mut req = request(perspective_request("perspective"));
    req.insert("img".to_string(), json!("data:image/png;base64,@@@@"));

    let err = Dispatcher::default().dispatch(req).unwrap_err();

    assert!(matches!(err, CommandError::InvalidImage(_)));
}
