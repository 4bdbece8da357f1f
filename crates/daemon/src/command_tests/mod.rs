// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

mod coerce;
mod dispatch;
mod validate;

#[test]
fn peer_messages_match_protocol_text() {
    assert_eq!(CommandError::MissingCommand.peer_message(), "no req");
    assert_eq!(
        CommandError::UnknownCommand("crop".to_string()).peer_message(),
        "invalid command 'crop'"
    );
    assert_eq!(
        CommandError::InvalidParameters(ValidationError::Missing("img".to_string()))
            .peer_message(),
        "parameter is insufficient."
    );
    assert_eq!(
        CommandError::InvalidImage(rectify_imaging::ContainerError::Pattern).peer_message(),
        "image is not base64-encoded image"
    );
}

#[test]
fn only_transform_failures_are_unexpected() {
    assert!(CommandError::Transform(rectify_imaging::TransformError::Degenerate).is_unexpected());
    assert!(!CommandError::MissingCommand.is_unexpected());
    assert!(!CommandError::UnknownCommand(String::new()).is_unexpected());
}
