//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the assembled application router with middleware
//!   (tracing, request ID, timeout, body limit, metrics)
//! - Bind the TCP listener
//! - Serve until the shutdown signal fires

use std::net::{AddrParseError, SocketAddr};
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::Application;
use crate::config::{ListenerConfig, ServerConfig};
use crate::observability::metrics;

/// Errors from binding or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid listen address `{address}`: {source}")]
    InvalidAddress {
        address: String,
        source: AddrParseError,
    },

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind a TCP listener on the configured host and port.
///
/// An occupied port is reported as [`ServerError::Bind`]; nothing retries.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ServerError> {
    let address = config
        .socket_addr()
        .map_err(|source| ServerError::InvalidAddress {
            address: format!("{}:{}", config.host, config.port),
            source,
        })?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listener bound"
    );

    Ok(listener)
}

/// HTTP server for an assembled [`Application`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Wrap the application's routes with the standard middleware stack.
    pub fn new(config: &ServerConfig, app: Application) -> Self {
        let router = Self::build_router(config, app.into_router());
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, routes: Router) -> Router {
        routes
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving through another gateway.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Blocks until `shutdown` fires (or its sender is dropped), then drains
    /// in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
