use axum::routing::get;
use axum::Router;

use crate::AppState;

pub mod graceful_shutdown;
pub mod metrics;
pub mod observability;
pub mod tracing;

pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics::get_metrics))
}
