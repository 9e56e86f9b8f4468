//! Listener setup and graceful shutdown shared by every service.

use anyhow::Context;
use axum::Router;
use tracing::{info, warn};

use confpilot_core::config::validate_listen;

/// Bind `listen` and serve `router` until Ctrl-C.
pub async fn serve(service: &'static str, listen: &str, router: Router) -> anyhow::Result<()> {
    validate_listen(listen)?;

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    let addr = listener.local_addr()?;
    info!(service, %addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(service, "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a handler the server runs until killed.
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
