//! Basic bot commands (start, help, status, menu)

use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use watchfolder::WatchFolder;

use crate::config::Config;
use crate::keyboards;
use crate::messages::{self, StatusReport};
use crate::types::HandlerResult;
use crate::utils::display_name;

/// Welcome message with the caller's chat ID and access
pub async fn start(bot: Bot, msg: Message, config: Arc<Config>) -> HandlerResult {
    let user_name = display_name(msg.from().map(|user| user.first_name.as_str()));
    let authorized = config.is_authorized(msg.chat.id);

    tracing::info!(chat_id = msg.chat.id.0, authorized, "Start command");

    bot.send_message(msg.chat.id, messages::welcome_text(&user_name, msg.chat.id, authorized))
        .reply_markup(keyboards::main_menu_keyboard())
        .await?;
    Ok(())
}

/// Display help message with available commands
pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::help_text())
        .reply_markup(keyboards::back_keyboard())
        .await?;
    Ok(())
}

/// Report the caller's access and the watch folder state
pub async fn status(bot: Bot, msg: Message, config: Arc<Config>, folder: WatchFolder) -> HandlerResult {
    let text = status_text(&config, &folder, msg.chat.id).await;
    bot.send_message(msg.chat.id, text)
        .reply_markup(keyboards::back_keyboard())
        .await?;
    Ok(())
}

/// Show interactive menu
pub async fn menu(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::menu_text())
        .reply_markup(keyboards::main_menu_keyboard())
        .await?;
    Ok(())
}

/// Plain text from an authorized chat gets a nudge towards sending a file
pub async fn other_text(bot: Bot, msg: Message, config: Arc<Config>) -> HandlerResult {
    if !config.is_authorized(msg.chat.id) {
        tracing::debug!(chat_id = msg.chat.id.0, "Ignoring text from unauthorized chat");
        return Ok(());
    }

    bot.send_message(msg.chat.id, messages::send_torrent_hint_text())
        .reply_markup(keyboards::info_keyboard())
        .await?;
    Ok(())
}

/// Status text shared by `/status` and the status button
pub(crate) async fn status_text(config: &Config, folder: &WatchFolder, chat_id: ChatId) -> String {
    let queued_torrents = match folder.count_torrents().await {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!("Failed to read watch folder {}: {}", folder.path().display(), err);
            0
        }
    };

    messages::status_text(&StatusReport {
        chat_id,
        authorized: config.is_authorized(chat_id),
        watch_folder: folder.path(),
        allowed_chats: config.allowed_chat_ids.len(),
        queued_torrents,
        checked_at: Utc::now(),
    })
}
