//! # Exchange Rates Server
//!
//! Long-running HTTP front for the two rate operations:
//!
//! - `GET /rates`: today's rates with their change since yesterday.
//! - `POST /ingest`: fetch the feed now and store today's record.
//! - `GET /health`: liveness.
//!
//! A cron job runs the same ingest once a day. Ctrl-C / SIGTERM trigger a
//! graceful shutdown through `tokio-graceful`.

#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_graceful::Shutdown;
use tracing::{error, info};

use lib_rates::loggers::setup_logging;
use lib_rates::{EcbFeed, connect_store};
use servers::rates_logic::config::{ServerCli, load_config};
use servers::rates_logic::routes::create_router;
use servers::rates_logic::scheduler::build_ingest_scheduler;
use servers::rates_logic::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // load .env files before anything else
    dotenvy::dotenv().ok();

    let config = load_config(ServerCli::parse().config)?;
    let _guard = setup_logging(&config.logging_options("server_rates")).context("failed to initialize logging")?;

    let rates_config = config.rates_settings().resolve()?;
    info!(
        table = %rates_config.table_name,
        feed = %rates_config.feed_url,
        store = rates_config.store.label(),
        "configuration loaded"
    );

    let store = connect_store(&rates_config).await?;
    let feed = Arc::new(EcbFeed::new(&rates_config)?);
    let state = AppState::new(feed, store);

    let cron = config.ingest_cron.clone().unwrap_or_default();
    let scheduler = build_ingest_scheduler(&cron, state.ingestor.clone())
        .await
        .with_context(|| format!("invalid ingest schedule {:?}", cron))?;
    scheduler.start().await?;
    info!(cron = %cron, "daily ingest scheduled");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port.unwrap_or(9010)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Starting HTTP server on http://{}", addr);

    let app = create_router(state);
    let shutdown = Shutdown::default();

    shutdown.spawn_task_fn(move |guard| async move {
        let mut scheduler = scheduler;
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            guard.cancelled().await;
            info!("Signal received: initiate graceful shutdown");
        });
        if let Err(e) = serve.await {
            error!("HTTP server error: {}", e);
        }
        if let Err(e) = scheduler.shutdown().await {
            error!("scheduler shutdown error: {}", e);
        }
    });

    match shutdown.shutdown_with_limit(Duration::from_secs(10)).await {
        Ok(elapsed) => {
            info!(
                "shutdown: gracefully {}s after shutdown signal received",
                elapsed.as_secs_f64()
            );
        }
        Err(e) => {
            info!("shutdown: forcefully due to timeout: {}", e);
        }
    }

    info!("Bye!");
    Ok(())
}
