//! # Photo Tournament Bot Main Entry Point
//!
//! Initializes logging, loads configuration, prepares the image and stats
//! storage, starts the maintenance service and the health server, and runs
//! the Telegram bot.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_tournament_bot::app::AppContext;
use photo_tournament_bot::bot::handlers::BotHandler;
use photo_tournament_bot::config::Config;
use photo_tournament_bot::services::health::HealthService;
use photo_tournament_bot::services::maintenance::MaintenanceService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_tournament_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Photo Tournament Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Images: {}, Uploads: {}, Stats: {}, HTTP Port: {}",
        config.images_root.display(),
        config.uploads_root.display(),
        config.stats_file.display(),
        config.http_port
    );

    if !config.images_root.is_dir() {
        tracing::warn!(
            "Images root {} does not exist, every category will be empty",
            config.images_root.display()
        );
    }

    // Load stats and rewrite legacy entries in the current format
    let ctx = Arc::new(AppContext::from_config(&config));
    if let Err(e) = ctx.stats.flush() {
        tracing::warn!("Could not normalize stats file: {}", e);
    }
    info!(
        "Storage initialized - {} categories, {} known users",
        ctx.categories().len(),
        ctx.stats.len()
    );

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(ctx.clone());
    info!("Telegram bot initialized successfully");

    // Initialize and start maintenance service
    info!("Initializing maintenance service...");
    let mut maintenance_service = match MaintenanceService::new(ctx.clone()).await {
        Ok(service) => {
            info!("Maintenance service initialized successfully");
            service
        }
        Err(e) => {
            tracing::error!("Failed to create maintenance service: {}", e);
            return Err(anyhow::anyhow!("Failed to create maintenance service: {}", e));
        }
    };

    if let Err(e) = maintenance_service.start().await {
        tracing::error!("Failed to start maintenance service: {}", e);
    } else {
        info!("Maintenance service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(ctx.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = maintenance_service.stop().await {
        tracing::warn!("Error stopping maintenance service: {}", e);
    }

    if let Err(e) = ctx.stats.flush() {
        tracing::warn!("Could not flush stats on shutdown: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
