//! Startup orchestration for the direct-run binary.
//!
//! # Responsibilities
//! - Build the application from validated configuration
//! - Announce that no production gateway is in front of it
//! - Start the optional metrics endpoint
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

use crate::app::{AppError, Application};
use crate::config::ServerConfig;
use crate::http::{self, HttpServer, ServerError};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Printed when the binary serves requests itself instead of being loaded
/// by a production server gateway.
pub const GATEWAY_NOTICE: &str = " * Running without a server gateway";

/// Anything that stops the direct-run server from coming up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Invalid metrics address `{0}`")]
    MetricsAddress(String),

    #[error("Failed to start metrics endpoint: {0}")]
    Metrics(#[from] BuildError),
}

/// Build, bind, and serve until `shutdown` is triggered.
pub async fn run_direct(config: ServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let shutdown_rx = shutdown.subscribe();
    let app = Application::build(&config)?;

    println!("{GATEWAY_NOTICE}");

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = http::bind(&config.listener).await?;
    let server = HttpServer::new(&config, app);

    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
