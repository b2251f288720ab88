//! Demo HTTP service: two example routes and a Prometheus scrape endpoint.

use std::sync::Arc;

use axum::Router;

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use server::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics: Arc::new(metrics),
        }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::router())
        .merge(server::router())
        .with_state(state)
}
