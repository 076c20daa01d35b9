// src/main.rs
//
// filmhub server entry point

use anyhow::Context;
use clap::Parser;

use filmhub::app::build_app_state;
use filmhub::application::build_router;
use filmhub::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING (RUST_LOG overrides the default filter)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. CONFIGURATION
    let config = AppConfig::parse();
    let storage = config.storage_config()?;

    // 3. STORAGE, SERVICES, STATE
    let state = build_app_state(&storage).context("failed to initialize storage")?;

    // 4. HTTP
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!("filmhub listening on {}", config.bind);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
