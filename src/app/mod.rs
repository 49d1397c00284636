//! Application construction.
//!
//! # Data Flow
//! ```text
//! ServerConfig (adapter, strict_adapter)
//!     → adapter.rs (AdapterSetting → Option<Adapter>)
//!     → Application::build
//!         → system routes (/health)
//!         → reporting blueprint, only for RANDOM / MYSQL
//!     → Application (router + registered blueprint names)
//! ```
//!
//! # Design Decisions
//! - Building never binds a socket; serving is the caller's job
//! - The adapter is passed in through config, never read from the process here
//! - Blueprint names are unique within an application

pub mod adapter;
pub mod blueprint;

use std::time::Instant;

use axum::Router;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::health;
use crate::reporting;

pub use adapter::{Adapter, AdapterSetting};
pub use blueprint::Blueprint;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unrecognized adapter `{0}` (expected one of RANDOM, MYSQL)")]
    UnknownAdapter(String),

    #[error("Blueprint `{0}` is already registered")]
    DuplicateBlueprint(&'static str),

    #[error("Blueprint `{blueprint}` route `{path}` is already served")]
    RouteConflict {
        blueprint: &'static str,
        path: &'static str,
    },
}

/// The assembled web application: its routes and which blueprints feed them.
#[derive(Debug)]
pub struct Application {
    router: Router,
    blueprints: Vec<&'static str>,
    paths: Vec<&'static str>,
    adapter: Option<Adapter>,
}

impl Application {
    /// An application carrying only the system routes.
    pub fn new() -> Self {
        Self {
            router: health::router(Instant::now()),
            blueprints: Vec::new(),
            paths: vec![health::HEALTH_PATH],
            adapter: None,
        }
    }

    /// Build the application described by `config`.
    ///
    /// The reporting blueprint is registered when the configured adapter is
    /// one of [`Adapter::ALL`]. Unknown adapters are skipped, or rejected
    /// when `strict_adapter` is set.
    pub fn build(config: &ServerConfig) -> Result<Self, AppError> {
        let adapter = AdapterSetting::from_raw(config.adapter.as_deref())
            .resolve(config.strict_adapter)?;

        let mut app = Self::new();
        match adapter {
            Some(adapter) => {
                app.register(reporting::blueprint(adapter))?;
                app.adapter = Some(adapter);
            }
            None => tracing::debug!("No reporting adapter selected"),
        }

        tracing::info!(
            adapter = ?app.adapter.map(|a| a.as_str()),
            blueprints = ?app.blueprints,
            "Application initialized"
        );

        Ok(app)
    }

    /// Attach a blueprint's routes to the application.
    ///
    /// Rejected without side effects when the name is taken or any of its
    /// paths is already served.
    pub fn register(&mut self, blueprint: Blueprint) -> Result<(), AppError> {
        let name = blueprint.name();
        if self.has_blueprint(name) {
            return Err(AppError::DuplicateBlueprint(name));
        }
        if let Some(path) = blueprint.paths().iter().copied().find(|p| self.paths.contains(p)) {
            return Err(AppError::RouteConflict {
                blueprint: name,
                path,
            });
        }

        let (paths, router) = blueprint.into_parts();
        self.router = std::mem::take(&mut self.router).merge(router);
        self.blueprints.push(name);
        self.paths.extend(paths);

        tracing::debug!(blueprint = name, "Blueprint registered");
        Ok(())
    }

    pub fn has_blueprint(&self, name: &str) -> bool {
        self.blueprints.iter().any(|registered| *registered == name)
    }

    /// Every path in the route table, system routes first.
    pub fn paths(&self) -> &[&'static str] {
        &self.paths
    }

    /// Registered blueprint names, in registration order.
    pub fn blueprints(&self) -> &[&'static str] {
        &self.blueprints
    }

    /// The adapter reporting was enabled for, if any.
    pub fn adapter(&self) -> Option<Adapter> {
        self.adapter
    }

    /// Hand the finished router to whatever is going to serve it.
    pub fn into_router(self) -> Router {
        self.router
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
