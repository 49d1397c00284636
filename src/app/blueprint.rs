//! Named route groups.

use axum::{routing::MethodRouter, Router};

/// A named, self-contained group of routes that can be attached to an
/// [`Application`](crate::app::Application).
///
/// Blueprints remember the paths they serve so the application can refuse
/// overlapping registrations before touching its router.
#[derive(Debug)]
pub struct Blueprint {
    name: &'static str,
    paths: Vec<&'static str>,
    router: Router,
}

impl Blueprint {
    /// Start a blueprint whose handlers share state `S`.
    pub fn builder<S>(name: &'static str) -> BlueprintBuilder<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        BlueprintBuilder {
            name,
            paths: Vec::new(),
            router: Router::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Paths served by this blueprint, in declaration order.
    pub fn paths(&self) -> &[&'static str] {
        &self.paths
    }

    pub(crate) fn into_parts(self) -> (Vec<&'static str>, Router) {
        (self.paths, self.router)
    }

    #[cfg(test)]
    pub(crate) fn into_router(self) -> Router {
        self.router
    }
}

/// Collects routes for a [`Blueprint`] before its state is applied.
#[derive(Debug)]
pub struct BlueprintBuilder<S> {
    name: &'static str,
    paths: Vec<&'static str>,
    router: Router<S>,
}

impl<S> BlueprintBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn route(mut self, path: &'static str, method_router: MethodRouter<S>) -> Self {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
        self.router = self.router.route(path, method_router);
        self
    }

    /// Apply the shared state and finish the blueprint.
    pub fn with_state(self, state: S) -> Blueprint {
        Blueprint {
            name: self.name,
            paths: self.paths,
            router: self.router.with_state(state),
        }
    }
}

impl BlueprintBuilder<()> {
    /// Finish a stateless blueprint.
    pub fn build(self) -> Blueprint {
        self.with_state(())
    }
}
