use anyhow::Result;
use devworkspace_api::{create_app, Config};
use devworkspace_client::InMemoryClientFactory;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("devworkspace_api=debug,devworkspace_client=debug,tower_http=debug")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting devworkspace-api service...");

    // Load configuration
    let config = Config::from_env().validate()?;
    info!(
        "Configuration loaded: bind_addr={}, base_api_path={}, routing_class={}",
        config.bind_addr, config.base_api_path, config.routing_class
    );

    warn!("Serving DevWorkspaces from the in-memory client; nothing reaches a cluster");
    let clients = Arc::new(InMemoryClientFactory::new());

    // Create app
    let app = create_app(&config, clients)?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
