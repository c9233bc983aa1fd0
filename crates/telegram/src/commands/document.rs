//! Handler for uploaded documents

use std::sync::Arc;

use teloxide::{prelude::*, types::Document};
use watchfolder::WatchFolder;

use crate::batch::{BatchEntry, UploadBatcher};
use crate::config::Config;
use crate::keyboards;
use crate::messages;
use crate::types::HandlerResult;
use crate::upload::{self, IncomingDocument, UploadOutcome};
use crate::utils::display_name;

/// Handle an uploaded file: rejections are answered right away, saved and
/// failed uploads are reported through the per-chat summary
pub async fn handle_document(
    bot: Bot,
    msg: Message,
    document: Document,
    config: Arc<Config>,
    folder: WatchFolder,
    batcher: UploadBatcher,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let incoming = IncomingDocument::from(&document);

    let entry = match upload::ingest(&config, &folder, chat_id, &incoming, &bot).await {
        UploadOutcome::Unauthorized => {
            bot.send_message(chat_id, messages::unauthorized_text(chat_id))
                .await?;
            return Ok(());
        }
        UploadOutcome::NotTorrent => {
            bot.send_message(chat_id, messages::not_torrent_text())
                .reply_markup(keyboards::see_help_keyboard())
                .await?;
            return Ok(());
        }
        UploadOutcome::TooLarge { size } => {
            bot.send_message(chat_id, messages::too_large_text(size))
                .await?;
            return Ok(());
        }
        UploadOutcome::InvalidContent { file_name } => {
            bot.send_message(chat_id, messages::invalid_content_text(&file_name))
                .await?;
            return Ok(());
        }
        UploadOutcome::Saved(saved) => {
            tracing::info!(
                chat_id = chat_id.0,
                file = %saved.file_name,
                size = saved.size,
                info_hash = saved.info_hash.as_deref().unwrap_or("unknown"),
                "Torrent queued in watch folder"
            );
            BatchEntry {
                file_name: saved.file_name,
                size: saved.size,
                saved: true,
            }
        }
        UploadOutcome::Failed { file_name, size, .. } => BatchEntry {
            file_name,
            size,
            saved: false,
        },
    };

    let user_name = display_name(msg.from().map(|user| user.first_name.as_str()));
    batcher.submit(bot, chat_id, user_name, entry, config.batch_window);
    Ok(())
}
