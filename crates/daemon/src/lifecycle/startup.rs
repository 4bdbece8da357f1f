// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: bind the listening socket and build the shared context.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::command::{Dispatcher, Registry};
use crate::listener::{ListenCtx, Listener};

use super::{Config, LifecycleError};

/// Bind the configured address with the default command registry.
///
/// Bind failures (e.g. port already in use) are the only fatal errors.
pub async fn startup(config: &Config) -> Result<Listener, LifecycleError> {
    let addr = config.listen_addr();
    let tcp =
        TcpListener::bind(addr).await.map_err(|e| LifecycleError::BindFailed(addr, e))?;

    let dispatcher = Dispatcher::new(Registry::default());
    let ctx = ListenCtx { dispatcher, read_timeout: config.read_timeout };
    info!(
        commands = ?ctx.dispatcher.registry().names(),
        read_timeout_ms = config.read_timeout.as_millis() as u64,
        "listener ready"
    );

    Ok(Listener::new(tcp, Arc::new(ctx)))
}
