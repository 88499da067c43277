mod config;
mod middleware;
mod routes;
mod signal;
mod snapshot;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::config::{Args, Config};
use crate::state::AppState;

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .max_blocking_threads(8)
        .build()
        .unwrap()
        .block_on(run())
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .unwrap();

    let config = Config::load(Args::parse()).await?;
    if config.takeover {
        free_port(config.port);
    }

    let shutdown = signal::shutdown();

    let url = config.url();
    let addr = format!("{}:{}", config.host, config.port);
    let open_browser = config.open;
    let state = AppState::new(config);
    let app = routes::app(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("serving {} on {url}", state.root().display());
    info!("auto-reload enabled for html, css, js and json files");

    if open_browser {
        if let Err(err) = open::that_detached(&url) {
            warn!("could not open browser: {err}");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Best-effort removal of whatever currently listens on the port. Races with
/// unrelated processes grabbing the port are inherent; a failure here is
/// logged and the subsequent bind decides the outcome.
fn free_port(port: u16) {
    let script = format!("lsof -ti:{port} | xargs kill -9");
    let status = std::process::Command::new("sh")
        .args(["-c", &script])
        .status();

    if let Err(err) = status {
        warn!("port takeover failed: {err}");
    }
}
