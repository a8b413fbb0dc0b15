//! User Cache - a caching proxy for a remote user API
//!
//! Forwards user CRUD operations upstream and keeps individual records in a
//! weighted, time-limited in-memory cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_cache::{api::create_router, spawn_cleanup_task, AppState, Config, HttpUserApi};

/// Main entry point for the user cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the upstream client, cache, and user service
/// 4. Start the expiry sweeper if enabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting User Cache Service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, capacity={}, entry_weight={}, ttl={}s, port={}, cleanup_interval={}s",
        config.upstream_base_url,
        config.cache_capacity,
        config.entry_weight,
        config.cache_ttl,
        config.server_port,
        config.cleanup_interval
    );

    let upstream = HttpUserApi::from_config(&config).context("failed to build upstream client")?;
    let state = AppState::from_config(&config, Arc::new(upstream));
    info!("Record cache initialized");

    let cleanup_handle = if config.cleanup_interval > 0 {
        info!("Expiry sweeper started");
        Some(spawn_cleanup_task(state.cache(), config.cleanup_interval))
    } else {
        info!("Expiry sweeper disabled, entries expire lazily");
        None
    };

    let app = create_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweeper aborted");
    }
}
