use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roomguide::bot::handle_message;
use roomguide::config::Config;
use roomguide::localization::LocalizationManager;
use roomguide::session::ConversationState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting room guide bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let loc = Arc::new(LocalizationManager::new()?);

    info!(
        "Connecting to database at {}",
        config.database.display_target()
    );

    // Lazy pool: a store that is down at startup surfaces per-query as the
    // "temporarily unavailable" reply instead of preventing the bot from
    // running at all.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&config.database.connection_url())?;

    let bot = Bot::new(config.bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ConversationState>, ConversationState>()
        .endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<ConversationState>::new(),
            pool,
            loc
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
