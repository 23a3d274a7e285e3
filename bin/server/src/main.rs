mod config;
mod constants;
mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use config::ServerConfig;
use state::AppState;
use std::sync::Arc;
use tempdrop_lifecycle::{ExpirySweeper, UploadManager};
use tempdrop_storage::FilesystemBlobStore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,actix_server::worker=warn,actix_server::accept=warn")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting upload server (PID: {})", std::process::id());

    let config = ServerConfig::load().context("Invalid configuration")?;

    let blobs = Arc::new(
        FilesystemBlobStore::new(&config.upload_dir)
            .await
            .context("Failed to initialize blob store")?,
    );
    info!("Using upload directory: {:?}", config.upload_dir);

    info!("Connecting to record store ({:?})...", config.store_type);
    let records = config
        .record_backend()
        .initialize()
        .await
        .context("Failed to initialize record store")?;
    info!("Record store initialized successfully");

    let manager = Arc::new(UploadManager::new(records.clone(), blobs.clone()));
    let sweeper = Arc::new(ExpirySweeper::new(
        records.clone(),
        blobs,
        config.sweep_interval,
    ));

    let shutdown = CancellationToken::new();
    let sweeper_handle = sweeper.start(shutdown.clone());
    info!(
        interval_seconds = config.sweep_interval.as_secs(),
        "Expiry sweeper started"
    );

    let state = web::Data::new(AppState::new(manager, config.public_url.clone()));
    let bind_address = config.bind_address();
    let max_upload_bytes = config.max_upload_bytes;
    info!(max_upload_bytes, "Upload size limit");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure_extractors(max_upload_bytes))
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind to {}", bind_address))?;

    info!("Server bound successfully to http://{}", bind_address);

    // Runs until a shutdown signal arrives
    let result = server.run().await;

    shutdown.cancel();
    if let Err(e) = sweeper_handle.await {
        error!("Expiry sweeper task failed: {}", e);
    }
    records.close().await;
    info!("Server stopped");

    result.context("Server terminated with an error")
}
