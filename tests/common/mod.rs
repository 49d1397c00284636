//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use reporting_webserver::config::ServerConfig;
use reporting_webserver::http::{self, HttpServer};
use reporting_webserver::{Application, Shutdown};

/// Config bound to an ephemeral loopback port.
pub fn loopback_config(adapter: Option<&str>) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.adapter = adapter.map(String::from);
    config
}

/// Build and serve an application, returning its address and shutdown handle.
pub async fn start_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let app = Application::build(&config).unwrap();
    let listener = http::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, app);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
