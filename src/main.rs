use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod app_state;
mod config;
mod db;
mod error;
mod middleware;
mod modules;
mod storage;

use app_state::AppState;
use storage::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::init().context("Failed to load configuration")?;
    info!(app = %config.app.name, environment = ?config.app.environment, "starting");

    let pool = db::init_pool()
        .await
        .context("Failed to initialize database pool")?;
    info!("database pool ready, migrations applied");

    let storage = LocalStorage::new(
        config.storage.root_dir.clone(),
        config.storage.public_base_url.clone(),
    )
    .await
    .context("Failed to initialize file storage")?;

    let state = AppState::new(pool, config.clone(), Arc::new(storage));
    let router = app::create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
