//! Signal handling for clean container shutdown.
//!
//! SIGTERM and SIGINT both force an immediate exit with code 0, so an
//! orchestrator stopping the container mid-probe does not mistake the
//! interrupted check for a crash. The top-level runner races the probe
//! against this future; the in-flight request is simply abandoned.

/// Wait for SIGTERM or SIGINT and return the signal name.
pub async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
