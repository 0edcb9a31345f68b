use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agriops_api::{app_router, config::AppConfig, db, events, migrator::Migrator, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::connect(&config)
        .await
        .context("failed to connect to the database")?;

    Migrator::up(&pool, None)
        .await
        .context("failed to run migrations")?;

    let (event_sender, _event_consumer) = events::channel(config.event_channel_capacity);

    let state = AppState::new(
        Arc::new(pool),
        config.clone(),
        Arc::new(event_sender),
    );
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "agriops-api listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
