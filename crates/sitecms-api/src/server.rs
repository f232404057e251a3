// src/server.rs

use {
    crate::rest::ApiServer,
    anyhow::{Context, Result},
    sitecms_common::CmsConfig,
    sitecms_store::bootstrap::bootstrap,
    tokio::sync::oneshot,
    tracing::{error, info, warn},
};

/// Seed missing site files, then serve until the shutdown signal fires.
/// Without an explicit signal the server stops on Ctrl+C.
pub async fn run_api_server_with_config(
    config: CmsConfig,
    shutdown_signal: Option<oneshot::Receiver<()>>,
) -> Result<()> {
    info!(
        "Starting {} v{}",
        config.server.service_name,
        env!("CARGO_PKG_VERSION")
    );

    let store_config = config.store.clone();
    let report = tokio::task::spawn_blocking(move || bootstrap(&store_config))
        .await
        .context("Bootstrap task panicked")?;
    let failed = report.failures().count();
    if failed > 0 {
        warn!("{} site file(s) could not be seeded", failed);
    }

    let server = ApiServer::new(config)?;
    server.register_default_checks().await;

    let shutdown = async move {
        match shutdown_signal {
            Some(rx) => {
                let _ = rx.await;
                info!("Shutdown requested");
            }
            None => ctrl_c().await,
        }
    };

    server.start(shutdown).await
}

/// Resolves on Ctrl+C. If the signal cannot be listened for, never resolves.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
