//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, cache setup, and the Axum
//! server lifecycle.

use crate::application::services::{ClickQueue, ClickRecorder, run_click_worker};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, LinkCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Cache client (or NullCache when no credentials are configured)
/// - Background click worker behind a bounded queue
/// - Axum HTTP server with graceful shutdown
///
/// The cache client connects on first use, so an unreachable cache never
/// blocks startup.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let backend: Arc<dyn CacheService> = match config.cache_credentials() {
        Some((endpoint, token)) => {
            tracing::info!("Cache enabled");
            Arc::new(RedisCache::new(endpoint, token))
        }
        None => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    };
    let cache = LinkCache::new(backend, config.cache_ttls());

    let pool = Arc::new(pool);
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool));

    let (click_queue, click_rx) = ClickQueue::new(config.click_queue_capacity);
    let recorder = Arc::new(ClickRecorder::new(links.clone(), clicks.clone()));
    let click_worker = tokio::spawn(run_click_worker(
        click_rx,
        recorder,
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = AppState::new(links, clicks, cache, config.home_url.clone(), click_queue);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router and its queue handles are gone; wait for queued clicks.
    if let Err(e) = click_worker.await {
        tracing::error!("Click worker failed: {}", e);
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
