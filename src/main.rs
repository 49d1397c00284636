//! Reporting webserver, direct-run entry point.
//!
//! ```text
//!  CLI flags ─┐
//!  env vars ──┼─▶ ServerConfig ─▶ Application::build ─▶ HttpServer ─▶ 0.0.0.0:8000
//!  TOML file ─┘        │                 │
//!                      │                 └─ /reporting (ADAPTER = RANDOM | MYSQL)
//!                      └─ logging, metrics
//! ```

use std::path::PathBuf;

use clap::Parser;

use reporting_webserver::config::{resolve_config, Overrides};
use reporting_webserver::lifecycle::{run_direct, signals, Shutdown};
use reporting_webserver::observability::logging;

#[derive(Parser)]
#[command(name = "reporting-webserver")]
#[command(about = "Development server for the reporting webserver", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides WEBSERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides WEBSERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Backend adapter (overrides ADAPTER)
    #[arg(short, long)]
    adapter: Option<String>,

    /// Reject unrecognized adapters instead of skipping reporting
    #[arg(long)]
    strict_adapter: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            adapter: self.adapter.clone(),
            strict_adapter: self.strict_adapter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &cli.overrides(),
    )?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        adapter = ?config.adapter,
        strict_adapter = config.strict_adapter,
        host = %config.listener.host,
        port = config.listener.port,
        request_timeout_secs = config.timeouts.request_secs,
        "reporting-webserver starting"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    run_direct(config, &shutdown).await?;
    Ok(())
}
