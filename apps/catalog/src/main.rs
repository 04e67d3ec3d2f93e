//! Catalog API Server
//!
//! Serves the in-memory items, books, and tasks collections over HTTP.
//!
//! # Usage
//!
//! ```bash
//! PORT=5000 cargo run --bin catalog
//! curl http://localhost:5000/api/books
//! ```

use anyhow::Context;
use catalog::{AppContext, Config, build_router};
use composable_crud_core::environment::SystemClock;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},catalog=debug", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Catalog API...");

    let clock = Arc::new(SystemClock);
    let ctx = if config.catalog.seed_data {
        AppContext::seeded(clock)
    } else {
        AppContext::empty(clock)
    };
    tracing::info!(
        items = ctx.items.len().await,
        books = ctx.books.len().await,
        tasks = ctx.tasks.len().await,
        "Collections ready"
    );

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(address = %listener.local_addr()?, "Catalog API listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, build_router(ctx))
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tracing::info!("Press Ctrl+C to shutdown");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;

    tracing::info!("Shutting down gracefully...");
    let _ = stop_tx.send(());

    match tokio::time::timeout(config.server.shutdown_timeout(), server).await {
        Ok(joined) => joined.context("server task panicked")?.context("server error")?,
        Err(_) => tracing::warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Open connections did not drain in time"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
