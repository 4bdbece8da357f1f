// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument validation for the `rectifyd` binary.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;

fn rectifyd() -> Command {
    let mut cmd = Command::cargo_bin("rectifyd").unwrap();
    cmd.env("RECTIFY_LOG_FILE", "");
    cmd
}

fn stderr_of(args: &[&str]) -> String {
    let output = rectifyd().args(args).output().unwrap();
    assert!(!output.status.success(), "expected failure for {args:?}");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_port_option() {
    let output = rectifyd().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--port"), "stdout: {stdout}");
    assert!(stdout.contains("--log-file"), "stdout: {stdout}");
}

#[test]
fn port_out_of_range_is_rejected() {
    assert!(stderr_of(&["--port", "70000"]).contains("port range : 0 ~ 65535"));
}

#[test]
fn negative_port_is_rejected() {
    assert!(stderr_of(&["-p=-1"]).contains("port range"));
}

#[test]
fn non_numeric_port_is_rejected() {
    assert!(stderr_of(&["--port", "http"]).contains("\"http\" is not a number"));
}

#[test]
fn log_file_conflicts_with_no_log_file() {
    assert!(stderr_of(&["--log-file", "x.log", "--no-log-file"]).contains("cannot be used with"));
}
