//! Broadsheet API server entry point.

use std::error::Error;
use std::sync::Arc;

use broadsheet_api::config::AppConfig;
use broadsheet_api::state::AppState;
use broadsheet_api::{app, telemetry};
use broadsheet_core::clock::SystemClock;
use broadsheet_memory_store::{InMemoryBlobStore, InMemoryDocumentRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Broadsheet API server");

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(InMemoryBlobStore::new(
            &config.media_base_url,
            config.blob_chunk_size,
        )),
    );

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    if let Some(provider) = tracer_provider {
        provider.shutdown()?;
    }

    Ok(())
}
