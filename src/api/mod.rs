use axum::{routing::get, Router};

use crate::AppState;

mod hello;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hello::root))
        .route("/error", get(hello::simulated_error))
}
