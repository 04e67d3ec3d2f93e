//! Request Lifecycle Tracker Demo
//!
//! Drives a running catalog server through the tracker and logs each view.
//!
//! # Usage
//!
//! ```bash
//! # Terminal 1
//! cargo run --bin catalog
//!
//! # Terminal 2
//! CATALOG_URL=http://localhost:5000 cargo run --bin tracker_demo
//! ```

use anyhow::Context;
use catalog::Config;
use catalog::domain::{Book, BookDraft, BookPatch};
use composable_crud_core::environment::SystemClock;
use composable_crud_lifecycle::{HttpTransport, LifecycleEnvironment, LifecycleView, Tracker};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn report(step: &str, view: &LifecycleView<Book>) {
    tracing::info!(
        step,
        state = ?view.state,
        books = view.collection.len(),
        error = view.error.as_deref().unwrap_or("-"),
        message = view.success_message.as_deref().unwrap_or("-"),
        "View"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,composable_crud_lifecycle=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let api_base = config.tracker.api_base();
    tracing::info!(api = %api_base, "Connecting tracker");

    let client = reqwest::Client::builder()
        .timeout(config.tracker.response_timeout())
        .build()
        .context("failed to build HTTP client")?;
    let transport = Arc::new(HttpTransport::<Book>::with_client(&api_base, client));
    let tracker = Tracker::new(LifecycleEnvironment::new(transport, Arc::new(SystemClock)))
        .with_response_timeout(config.tracker.response_timeout());

    report("fetch_all", &tracker.fetch_all().await?);

    let view = tracker
        .create(BookDraft::new("Beloved", "Toni Morrison").published(1987))
        .await?;
    report("create", &view);

    let created = view
        .collection
        .iter()
        .rev()
        .find(|b| b.title == "Beloved")
        .map(|b| b.id)
        .context("created book missing from collection")?;

    report(
        "update",
        &tracker.update(created, BookPatch::title("Beloved: A Novel")).await?,
    );
    report("create (invalid)", &tracker.create(BookDraft::default()).await?);
    report("delete", &tracker.delete(created).await?);
    report("delete (missing)", &tracker.delete(created).await?);
    report("clear_messages", &tracker.clear_messages().await?);

    Ok(())
}
