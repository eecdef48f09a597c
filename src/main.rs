//! # Teacher Finder Bot Main Entry Point
//! 
//! Initializes logging, loads configuration, opens the dataset built by
//! `build-dataset`, and runs the Telegram bot next to the health server.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::dispatching::dialogue::InMemStorage;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teacher_finder_bot::bot::dialogue::FindState;
use teacher_finder_bot::bot::handlers::BotHandler;
use teacher_finder_bot::config::Config;
use teacher_finder_bot::database::connection::DatabaseManager;
use teacher_finder_bot::database::models::{ClassSession, Teacher};
use teacher_finder_bot::services::health::HealthService;
use teacher_finder_bot::services::lookup::TeacherLookup;
use teacher_finder_bot::utils::logging::log_system_event;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teacher_finder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    
    info!("Starting Teacher Finder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}", 
        config.database_url, config.http_port);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let teachers = Teacher::count(&db_manager.pool).await?;
    let classes = ClassSession::count(&db_manager.pool).await?;
    if teachers == 0 {
        tracing::warn!("Dataset is empty, run build-dataset before serving lookups");
    }
    log_system_event(
        "dataset loaded",
        Some(&format!("{teachers} teachers, {classes} classes")),
    );
    let db_arc = Arc::new(db_manager);
    
    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(TeacherLookup::new(db_arc.as_ref().clone()));
    info!("Telegram bot initialized successfully");
    
    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    
    info!("Health check server starting on port {}", config.http_port);
    
    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<FindState>> = InMemStorage::new();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
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
    
    info!("Application stopped");
    Ok(())
}
