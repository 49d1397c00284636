//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ServerConfig::default)
//!     → loader.rs (optional TOML file)
//!     → loader.rs (environment: ADAPTER, WEBSERVER_HOST, ...)
//!     → loader.rs (command-line overrides)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated afterwards
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, ConfigError, Overrides};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServerConfig};
pub use validation::ValidationError;
