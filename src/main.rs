//! HR engine HTTP server.
//!
//! Reads configuration from `HR_ENGINE_CONFIG` (default `./config/default`)
//! and listens on `HR_ENGINE_ADDR` (default `127.0.0.1:3000`).

use std::env;
use std::sync::Arc;

use hr_engine::api::{AppState, create_router};
use hr_engine::config::ConfigLoader;
use hr_engine::store::InMemoryStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("HR_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("HR_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    let roster = ConfigLoader::load_roster(&config_dir)?;
    info!(config_dir = %config_dir, employees = roster.len(), "Configuration loaded");

    let store = InMemoryStore::with_employees(*config.leave_settings(), roster)?;
    let state = AppState::new(&config, Arc::new(store))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "HR engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
