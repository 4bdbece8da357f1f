// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rectifyd: perspective rectification server.

use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rectify_daemon::{logging, startup, Config, LifecycleError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "rectifyd", version, about = "Perspective rectification server")]
struct Args {
    /// Port to listen on (default 9766, or RECTIFY_PORT)
    #[arg(short = 'p', long, value_parser = parse_port)]
    port: Option<u16>,

    /// Address to listen on (default: the outbound-routable address)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Per-read timeout in milliseconds while receiving a request
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// Append logs to this file
    #[arg(long, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Log to stderr only
    #[arg(long)]
    no_log_file: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(ms) = self.read_timeout_ms {
            config.read_timeout = Duration::from_millis(ms);
        }
        if self.no_log_file {
            config.log_file = None;
        } else if let Some(path) = self.log_file {
            config.log_file = Some(path);
        }
        config
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    let port: i64 = raw.trim().parse().map_err(|_| format!("\"{raw}\" is not a number"))?;
    u16::try_from(port).map_err(|_| "port range : 0 ~ 65535".to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Args::parse().apply(Config::load());

    let _guard = match logging::init(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("rectifyd: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), LifecycleError> {
    let listener = startup(&config).await?;
    let addr = listener.local_addr()?;
    info!(host = %addr.ip(), port = addr.port(), "listening");

    let shutdown = CancellationToken::new();
    let server = tokio::spawn(listener.run(shutdown.clone()));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupted"),
        Err(e) => error!("failed to wait for ctrl-c: {}", e),
    }
    shutdown.cancel();
    let _ = server.await;

    info!("SHUTDOWN");
    Ok(())
}
