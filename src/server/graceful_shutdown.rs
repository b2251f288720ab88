use tokio::signal::ctrl_c;

#[cfg(not(target_os = "windows"))]
pub async fn graceful_shutdown() {
    use tokio::select;
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "cannot install SIGTERM handler, waiting for CTRL-C only");
            wait_ctrl_c().await;
            return;
        }
    };
    select! {
        _ = terminate.recv() => {
            tracing::info!("Received SIGTERM, shutting down");
        }
        _ = wait_ctrl_c() => {}
    }
}

#[cfg(target_os = "windows")]
pub async fn graceful_shutdown() {
    wait_ctrl_c().await;
}

async fn wait_ctrl_c() {
    match ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT, shutting down"),
        Err(e) => tracing::error!(error = %e, "failed to listen for CTRL-C"),
    }
}
