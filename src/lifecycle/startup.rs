//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Open the upstream channel (fatal on failure)
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when the upstream is ready)

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, ConfigError, GatewayConfig};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};
use crate::rpc::{GatewayError, RpcGateway};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address '{address}': {source}")]
    MetricsAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("upstream unavailable: {0}")]
    Upstream(#[from] GatewayError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Load configuration, set up observability, then serve.
pub async fn run(config_path: Option<&Path>) -> Result<(), StartupError> {
    let config = config::loader::load(config_path)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        tls = config.upstream.tls,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    start(config, Shutdown::new()).await
}

/// Start every subsystem for an already validated configuration.
pub async fn start(config: GatewayConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let shutdown_rx = shutdown.subscribe();

    for (key, value) in &config.upstream.metadata {
        if value.is_empty() {
            tracing::warn!(key = %key, "Upstream metadata value is empty");
        }
    }

    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr = address
            .parse::<SocketAddr>()
            .map_err(|source| StartupError::MetricsAddress {
                address: address.clone(),
                source,
            })?;
        metrics::init_metrics(addr)?;
    }

    let gateway = RpcGateway::connect(&config.upstream).await?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;
    tracing::info!(
        address = %listener.local_addr().map_err(StartupError::Serve)?,
        "Listening for connections"
    );

    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(&config, AppState::from_gateway(gateway));
    server
        .run(listener, shutdown_rx)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
