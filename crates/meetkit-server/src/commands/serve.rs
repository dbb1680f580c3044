use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use meetkit_core::{Config, MeetingStore};

use crate::api::{create_router, ApiState};
use crate::logging;

#[derive(Args)]
pub struct ServeArgs {
    /// Config file (defaults to ~/.config/meetkit/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Bind address
    #[arg(long)]
    pub host: Option<String>,
    /// Bind port
    #[arg(long)]
    pub port: Option<u16>,
    /// Meeting fixture to load at startup
    #[arg(long)]
    pub fixture: Option<PathBuf>,
    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl ServeArgs {
    /// Load the config file and apply command-line overrides.
    fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load_or_default()?,
        };
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(fixture) = &self.fixture {
            config.data.fixture_path = fixture.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
        Ok(config)
    }
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    logging::init(&config.logging.level, config.logging.json);

    tracing::info!("Starting meetkit v{}", env!("CARGO_PKG_VERSION"));

    let fixture = &config.data.fixture_path;
    let store = MeetingStore::open(fixture)
        .with_context(|| format!("failed to load fixture {}", fixture.display()))?;
    let router = create_router(Arc::new(ApiState::new(store)), config.server.enable_cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.server.host, config.server.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, cors = config.server.enable_cors, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
