//! Callback query handlers for inline keyboard interactions
//!
//! Button presses edit the message they are attached to instead of sending
//! a new one.

use std::sync::Arc;

use teloxide::{prelude::*, types::InlineKeyboardMarkup};
use watchfolder::WatchFolder;

use crate::commands;
use crate::config::Config;
use crate::keyboards;
use crate::messages;
use crate::types::{HandlerResult, MenuAction};
use crate::utils::display_name;

/// Handle all callback queries from inline keyboards
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    config: Arc<Config>,
    folder: WatchFolder,
) -> HandlerResult {
    // Answer callback query to remove loading state
    bot.answer_callback_query(&q.id).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let Some(action) = MenuAction::parse(data) else {
        tracing::debug!("Unknown callback data: {:?}", data);
        return Ok(());
    };

    let Some(message) = q.message else {
        return Ok(());
    };

    let chat_id = message.chat.id;
    let (text, keyboard): (String, InlineKeyboardMarkup) = match action {
        MenuAction::Menu => (messages::menu_text(), keyboards::main_menu_keyboard()),
        MenuAction::Help => (messages::help_text(), keyboards::back_keyboard()),
        MenuAction::Status => (
            commands::status_text(&config, &folder, chat_id).await,
            keyboards::back_keyboard(),
        ),
        MenuAction::HowTo => (messages::how_to_text(), keyboards::back_keyboard()),
        MenuAction::Author => (messages::author_text(), keyboards::back_keyboard()),
        MenuAction::ChatId => {
            let user_name = display_name(Some(q.from.first_name.as_str()));
            (messages::chat_id_text(&user_name, chat_id), keyboards::back_keyboard())
        }
    };

    if let Err(err) = bot
        .edit_message_text(chat_id, message.id, text)
        .reply_markup(keyboard)
        .await
    {
        // Pressing the same button twice leaves the text unchanged
        tracing::debug!(chat_id = chat_id.0, "Failed to edit menu message: {}", err);
    }

    Ok(())
}
