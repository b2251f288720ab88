//! The two demo routes. Each bumps `http_requests_total` before answering.

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use tracing::{info, instrument};

use crate::AppState;

#[instrument(name = "root_handler", skip_all)]
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let status = StatusCode::OK;
    state.metrics().record_request(&Method::GET, status);
    info!(status = status.as_u16(), "Handled /");

    (status, "Hello, World!")
}

/// Always answers 500. The failure is fabricated, nothing went wrong.
#[instrument(name = "error_handler", skip_all)]
pub async fn simulated_error(State(state): State<AppState>) -> impl IntoResponse {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    state.metrics().record_request(&Method::GET, status);
    info!(status = status.as_u16(), "Handled /error");

    (status, "Internal Server Error")
}
