//! Reporting webserver library.
//!
//! Server gateways embed the application through [`Application::build`] and
//! serve [`Application::into_router`] themselves; nothing here binds a socket
//! until [`lifecycle::run_direct`] is called.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reporting;

pub use app::{Adapter, Application};
pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
