//! Recipe API server
//!
//! ```bash
//! RECIPES_JSON=./US_recipes.json cargo run
//! ```
//!
//! Then visit:
//! - **API**: <http://localhost:8000/api/recipes>
//! - **Documentation**: <http://localhost:8000/docs>

use anyhow::Context;
use recipe_api::{
    Config, MemoryRecipeStore, RecipeService, RecipeStore, SqlRecipeStore, StoreBackend,
    routes, seed::SeedOutcome, seed::SeedSource,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn RecipeStore>> {
    match config.store {
        StoreBackend::Sql => {
            let store = SqlRecipeStore::connect(&config.database_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.database_url))?;
            store
                .ensure_schema()
                .await
                .context("failed to create recipes schema")?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryRecipeStore::new())),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(store = ?config.store, seed = %config.seed_path.display(), "Starting recipe API");

    let store = build_store(&config).await?;

    // Seed before binding so no request can observe a half-imported store
    match store
        .seed_if_empty(SeedSource::File(config.seed_path.clone()))
        .await
        .context("failed to seed recipes")?
    {
        SeedOutcome::Imported { count } => tracing::info!(count, "Recipe store seeded"),
        SeedOutcome::Skipped { existing } => tracing::info!(existing, "Recipe store ready"),
    }

    let app = routes::app(RecipeService::new(store), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "API: /api/recipes, docs: /docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
