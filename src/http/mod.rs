//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, limits, metrics)
//!     → Application router
//!         → health.rs (/health, always present)
//!         → registered blueprints (e.g. /reporting)
//!     → Send to client
//! ```

pub mod health;
pub mod server;

pub use server::{bind, HttpServer, ServerError};
