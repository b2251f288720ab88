use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::Result;
use crate::server::observability::Metrics;
use crate::AppState;

pub async fn get_metrics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    tracing::debug!("/metrics requested");

    let body = state.metrics().render()?;

    Ok(([(header::CONTENT_TYPE, Metrics::CONTENT_TYPE)], body))
}
