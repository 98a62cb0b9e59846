#![warn(missing_docs)]
//! A Telegram bot for insurance agents.
//!
//! Agents keep their customers and applications in the bot and browse them
//! through searchable, paginated listings. The pagination and search
//! utilities live in [`pagination`] and do not depend on Telegram.

/// The main handler for the bot's logic.
pub mod bot_handler;
/// The configuration for the application.
pub mod config;
/// The dispatcher for routing updates to the correct handlers.
pub mod dispatcher;
/// The service for sending messages to the user.
pub mod messaging;
/// Page slicing, searching and page-number windows.
pub mod pagination;
/// The service for browsing and managing an agent's records.
pub mod records;
/// The storage layer for persisting data.
pub mod storage;
/// Text folding for accent-insensitive Greek search.
pub mod text;

use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::{SqliteStorage, serializer},
    prelude::*,
};

use crate::{
    bot_handler::BotHandler, config::Config, messaging::TelegramMessagingService,
    records::DefaultRecordService, storage::sqlite::SqliteStorage as ApplicationStorage,
};

/// Runs the bot.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing::info!(
        "Starting with page size {}, at most {} records per agent",
        config.page_size,
        config.max_records_per_agent
    );

    let storage = Arc::new(ApplicationStorage::new(&config.database_url).await?);
    let bot = Bot::new(config.telegram_bot_token.clone());

    let messaging_service = Arc::new(TelegramMessagingService::new(bot.clone()));
    let record_service = Arc::new(DefaultRecordService::new(
        storage,
        config.page_size,
        config.max_records_per_agent,
    ));

    let dialogue_storage = SqliteStorage::open(&config.database_url, serializer::Json).await?;
    let handler =
        Arc::new(BotHandler::new(messaging_service, record_service, config.max_concurrency));
    let mut dispatcher = dispatcher::BotDispatcher::new(handler, dialogue_storage).build(bot);
    tracing::debug!("Dispatcher built successfully.");

    dispatcher.dispatch().await;

    Ok(())
}
