// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Port used when neither `--port` nor `RECTIFY_PORT` is given.
pub const DEFAULT_PORT: u16 = 9766;

/// Log file used when `RECTIFY_LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "log/server.log";

/// Listen port override (`RECTIFY_PORT`).
pub fn port() -> Option<u16> {
    std::env::var("RECTIFY_PORT").ok().and_then(|s| s.trim().parse::<u16>().ok())
}

/// Listen address override (`RECTIFY_HOST`). Without it the host is detected.
pub fn host() -> Option<IpAddr> {
    std::env::var("RECTIFY_HOST").ok().and_then(|s| s.trim().parse::<IpAddr>().ok())
}

/// Per-read timeout while assembling a request (`RECTIFY_READ_TIMEOUT_MS`, default 500ms).
pub fn read_timeout() -> Duration {
    std::env::var("RECTIFY_READ_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(rectify_wire::DEFAULT_READ_TIMEOUT)
}

/// Log file path (`RECTIFY_LOG_FILE`). Set to an empty string to log to
/// stderr only.
pub fn log_file() -> Option<PathBuf> {
    match std::env::var("RECTIFY_LOG_FILE") {
        Ok(path) if path.is_empty() => None,
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => Some(PathBuf::from(DEFAULT_LOG_FILE)),
    }
}
