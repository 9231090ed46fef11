use std::env;

use courier_engine::api::{AppState, create_router};
use courier_engine::config::ConfigLoader;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/standard";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Env vars may also be set externally
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("COURIER_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("COURIER_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .inspect_err(|e| error!(config_dir = %config_dir, "Failed to load configuration: {}", e))?;
    info!(
        service = %config.service().name,
        currency = %config.service().currency,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .inspect_err(|e| error!(bind_addr = %bind_addr, "Failed to bind: {}", e))?;

    info!(bind_addr = %bind_addr, "Courier engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
