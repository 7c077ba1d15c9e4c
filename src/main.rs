//! Image aggregator HTTP server

use anyhow::Result;
use image_aggregator::{
    config,
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let path = config::locate();
    let settings = config::load_from(path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.general.log_level())),
        )
        .with_target(false)
        .init();

    info!("Starting image-aggregator v{}", image_aggregator::VERSION);
    match &path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let registry = ProviderLoader::load(&settings)?;
    if registry.is_empty() {
        anyhow::bail!("No image providers enabled");
    }

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(settings, registry, client);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
