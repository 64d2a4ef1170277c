//! skydeskd — SkyDesk ID server daemon.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use skydesk_api::ApiState;
use skydesk_core::{DeviceRegistry, SkydeskConfig, SERVICE_NAME, SERVICE_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let config_path = SkydeskConfig::file_path();
    let config = SkydeskConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        let mut config = SkydeskConfig::default();
        config.apply_env_overrides();
        config
    });
    tracing::info!(
        service = SERVICE_NAME,
        version = SERVICE_VERSION,
        config = %config_path.display(),
        "skydeskd starting"
    );
    if config.server.expose_internal_errors {
        tracing::warn!("raw parse errors will be returned to callers");
    }

    // Shared state
    let state = ApiState {
        registry: DeviceRegistry::new(),
        expose_internal_errors: config.server.expose_internal_errors,
    };

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    skydesk_api::serve(listener, state, async move {
        let _ = shutdown_rx.recv().await;
    })
    .await?;

    tracing::info!("shut down");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    tokio::signal::ctrl_c().await.ok();
}
