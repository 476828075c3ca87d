//! HTTP server for the tax engine.
//!
//! Reads the configuration directory from `TAX_ENGINE_CONFIG` (default
//! `./config/pl`) and listens on `TAX_ENGINE_ADDR` (default `0.0.0.0:3000`).

use std::env;

use pl_tax_engine::api::{AppState, create_router};
use pl_tax_engine::config::ConfigLoader;
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/pl";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_dir = env::var("TAX_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("TAX_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let loader = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        jurisdiction = %loader.jurisdiction().code,
        tables = loader.tables().len(),
        "Loaded configuration"
    );

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
