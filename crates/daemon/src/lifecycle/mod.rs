// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration and startup.

mod startup;
pub use startup::startup;

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address to listen on
    pub host: IpAddr,
    /// Port to listen on (0 picks an ephemeral port)
    pub port: u16,
    /// Bound on each read while assembling a request
    pub read_timeout: Duration,
    /// Append-only log file, in addition to stderr
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the environment, detecting the host when
    /// `RECTIFY_HOST` is unset.
    pub fn load() -> Self {
        Self {
            host: env::host().unwrap_or_else(detect_host),
            port: env::port().unwrap_or(env::DEFAULT_PORT),
            read_timeout: env::read_timeout(),
            log_file: env::log_file(),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, #[source] std::io::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Address of the interface that routes to the outside world, or loopback.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
pub fn detect_host() -> IpAddr {
    let local_route = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect((Ipv4Addr::new(8, 8, 8, 8), 1))?;
        Ok(socket.local_addr()?.ip())
    };
    match local_route() {
        Ok(ip) if !ip.is_unspecified() => ip,
        Ok(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Err(e) => {
            debug!(error = %e, "no outbound route, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
