//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, worker spawning, and the Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc};

/// Opens a PostgreSQL pool with the configured limits and applies migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Selects the link store: PostgreSQL when configured, in-memory otherwise.
///
/// Returns the repository and its name for health reporting.
pub async fn build_repository(config: &Config) -> Result<(Arc<dyn LinkRepository>, &'static str)> {
    match &config.database_url {
        Some(database_url) => {
            let pool = connect_database(config, database_url).await?;
            let repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
            Ok((repository, "postgres"))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let repository: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
            Ok((repository, "memory"))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// On Ctrl-C or SIGTERM the server stops accepting connections and waits up
/// to `shutdown_timeout_seconds` for in-flight requests, then gives the click
/// worker the same budget to drain its queue.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, storage) = build_repository(&config).await?;

    let link_service = Arc::new(LinkService::new(
        repository,
        config.url_validator(),
        config.code_length,
    ));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        link_service.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = AppState::new(link_service, click_tx, &config.base_url, storage);
    let app = app_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    let grace = Duration::from_secs(config.shutdown_timeout_seconds);
    let shutdown_started = Arc::new(Notify::new());

    let server = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown({
        let shutdown_started = shutdown_started.clone();
        async move {
            shutdown_signal().await;
            shutdown_started.notify_one();
        }
    });

    tokio::select! {
        result = server.into_future() => result.context("Server error")?,
        _ = async {
            shutdown_started.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!("Graceful shutdown timed out, dropping open connections");
        }
    }

    match tokio::time::timeout(grace, worker).await {
        Ok(_) => tracing::info!("Click queue drained"),
        Err(_) => tracing::warn!("Click worker did not finish in time, pending clicks dropped"),
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
