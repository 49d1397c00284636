//! Configuration loading from disk, environment, and command-line overrides.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment,
//! explicit overrides. Validation runs once, after every layer is applied.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Selects the backend adapter; `RANDOM` or `MYSQL` enable reporting.
pub const ENV_ADAPTER: &str = "ADAPTER";
/// `true`/`1` rejects unrecognized adapters at startup.
pub const ENV_ADAPTER_STRICT: &str = "ADAPTER_STRICT";
pub const ENV_HOST: &str = "WEBSERVER_HOST";
pub const ENV_PORT: &str = "WEBSERVER_PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value `{value}` for environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Explicit values that win over file and environment, typically from the CLI.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub adapter: Option<String>,
    pub strict_adapter: bool,
}

/// Read a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the process environment so callers (and tests) can
/// supply their own source.
pub fn apply_env<F>(config: &mut ServerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(adapter) = lookup(ENV_ADAPTER) {
        // An empty value behaves like an unset one.
        config.adapter = Some(adapter).filter(|a| !a.is_empty());
    }

    if let Some(raw) = lookup(ENV_ADAPTER_STRICT) {
        config.strict_adapter = parse_flag(&raw).ok_or(ConfigError::InvalidEnv {
            key: ENV_ADAPTER_STRICT,
            value: raw,
        })?;
    }

    if let Some(host) = lookup(ENV_HOST) {
        config.listener.host = host;
    }

    if let Some(raw) = lookup(ENV_PORT) {
        config.listener.port = raw.parse().map_err(|_| ConfigError::InvalidEnv {
            key: ENV_PORT,
            value: raw,
        })?;
    }

    Ok(())
}

/// Overlay explicit overrides onto `config`.
pub fn apply_overrides(config: &mut ServerConfig, overrides: &Overrides) {
    if let Some(host) = &overrides.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if let Some(adapter) = &overrides.adapter {
        config.adapter = Some(adapter.clone()).filter(|a| !a.is_empty());
    }
    if overrides.strict_adapter {
        config.strict_adapter = true;
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration from every layer and validate it.
pub fn resolve_config<F>(
    path: Option<&Path>,
    lookup: F,
    overrides: &Overrides,
) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    apply_overrides(&mut config, overrides);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
