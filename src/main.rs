use minikube_metrics_demo::server::graceful_shutdown::graceful_shutdown;
use minikube_metrics_demo::server::observability::spawn_process_sampler;
use minikube_metrics_demo::server::tracing::init_tracing_logging;
use minikube_metrics_demo::{app, AppState, Config, Metrics, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cfg = Config::default();
    init_tracing_logging(&cfg)?;

    let state = AppState::new(Metrics::new()?);
    spawn_process_sampler(state.metrics().clone(), cfg.sample_interval);

    let listener = tokio::net::TcpListener::bind(cfg.listen).await?;
    let port = listener.local_addr()?.port();

    println!("App running on port {port}");
    tracing::info!(listen = %cfg.listen, "server started, stop with CTRL-C");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(graceful_shutdown())
        .await?;

    Ok(())
}
