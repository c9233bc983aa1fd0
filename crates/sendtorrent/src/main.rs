use std::process::ExitCode;
use std::sync::Arc;

use ::telegram::{telegram, Config, UploadBatcher};
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;
use watchfolder::WatchFolder;

const DEFAULT_LOG_FILTER: &str = "info,teloxide=warn,reqwest=warn,hyper=warn";

/// Set up the global subscriber; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let folder = WatchFolder::new(config.watch_folder.clone());
    if let Err(err) = folder.ensure_exists().await {
        tracing::error!("Watch folder is not usable: {}", err);
        return ExitCode::FAILURE;
    }

    let bot = Bot::new(config.bot_token.expose());

    if let Err(err) = telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", err);
    }

    tracing::info!(
        watch_folder = %folder.path().display(),
        allowed_chats = config.allowed_chat_ids.len(),
        batch_window_ms = config.batch_window.as_millis() as u64,
        "Bot started"
    );

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![Arc::new(config), folder, UploadBatcher::new()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bot stopped");
    ExitCode::SUCCESS
}
