mod config;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use predictor::{artifacts, Predictor};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::parse();
    let paths = config.artifact_paths();

    for (name, path) in paths.entries() {
        match artifacts::fingerprint(path) {
            Ok(digest) => info!(artifact = name, path = %path.display(), sha256 = %digest, "artifact"),
            Err(err) => warn!(artifact = name, path = %path.display(), error = %err, "cannot fingerprint artifact"),
        }
    }

    // Nothing is served until the bundle has loaded and passed validation.
    let predictor = Predictor::load(&paths).context("failed to load prediction artifacts")?;
    info!(?predictor, "predictor ready");

    let app = routes::router(Arc::new(predictor));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
