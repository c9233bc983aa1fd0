//! Reply texts
//!
//! All replies are plain text so file names and user names never need
//! escaping.

use std::path::Path;

use chrono::{DateTime, Utc};
use teloxide::{types::ChatId, utils::command::BotCommands};

use crate::batch::BatchEntry;
use crate::constants::{emoji, MAX_TORRENT_FILE_SIZE};
use crate::types::Command;
use crate::utils::{format_size, plural};

fn access_label(authorized: bool) -> String {
    if authorized {
        format!("{} AUTHORIZED", emoji::SUCCESS)
    } else {
        format!("{} NOT AUTHORIZED", emoji::ERROR)
    }
}

pub fn welcome_text(user_name: &str, chat_id: ChatId, authorized: bool) -> String {
    format!(
        "{robot} Send Torrent Bot\n\n\
        {wave} Welcome {user_name}!\n\n\
        Send me a .torrent file and I'll drop it into the watch folder \
        for your torrent client.\n\n\
        {key} Your chat ID: {chat_id}\n\
        Access: {access}\n\n\
        Use the menu below to get started!",
        robot = emoji::ROBOT,
        wave = emoji::WAVE,
        key = emoji::KEY,
        chat_id = chat_id.0,
        access = access_label(authorized),
    )
}

pub fn help_text() -> String {
    format!(
        "{book} Help\n\n\
        {commands}\n\n\
        Quick actions:\n\
        • Send any .torrent file (up to {max})\n\
        • Send several at once, you get one summary\n\
        • Use the menu buttons to check your access",
        book = emoji::BOOK,
        commands = Command::descriptions(),
        max = format_size(MAX_TORRENT_FILE_SIZE as u64),
    )
}

pub fn menu_text() -> String {
    format!("{} Main Menu - Choose an option:", emoji::ROBOT)
}

pub fn how_to_text() -> String {
    format!(
        "{list} How to use\n\n\
        1. Find a .torrent file\n\
        2. Send it to this bot\n\
        3. Wait for the confirmation\n\
        4. Your torrent client picks it up from the watch folder\n\n\
        Only .torrent files are accepted.",
        list = emoji::LIST,
    )
}

pub fn chat_id_text(user_name: &str, chat_id: ChatId) -> String {
    format!(
        "{key} Your chat ID\n\n\
        User: {user_name}\n\
        Chat ID: {chat_id}\n\n\
        To get access, add it to ALLOWED_CHAT_IDS, e.g.\n\
        ALLOWED_CHAT_IDS={chat_id}",
        key = emoji::KEY,
        chat_id = chat_id.0,
    )
}

pub fn author_text() -> String {
    format!(
        "{dev} Author\n\n\
        {authors}\n\n\
        {robot} Send Torrent Bot v{version}\n\
        License: {license}",
        dev = emoji::DEVELOPER,
        authors = env!("CARGO_PKG_AUTHORS").replace(':', "\n"),
        robot = emoji::ROBOT,
        version = env!("CARGO_PKG_VERSION"),
        license = env!("CARGO_PKG_LICENSE"),
    )
}

/// Snapshot shown by `/status`
#[derive(Debug, Clone)]
pub struct StatusReport<'a> {
    pub chat_id: ChatId,
    pub authorized: bool,
    pub watch_folder: &'a Path,
    pub allowed_chats: usize,
    pub queued_torrents: usize,
    pub checked_at: DateTime<Utc>,
}

pub fn status_text(report: &StatusReport<'_>) -> String {
    format!(
        "{status} Bot Status\n\n\
        {online} System: ONLINE\n\n\
        {key} Your access: {access}\n\
        Chat ID: {chat_id}\n\n\
        {folder} Watch folder: {path}\n\
        Authorized chats: {allowed}\n\
        Torrents waiting: {queued}\n\n\
        Last checked: {checked}",
        status = emoji::STATUS,
        online = emoji::ONLINE,
        key = emoji::KEY,
        access = access_label(report.authorized),
        chat_id = report.chat_id.0,
        folder = emoji::FOLDER,
        path = report.watch_folder.display(),
        allowed = report.allowed_chats,
        queued = report.queued_torrents,
        checked = report.checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

pub fn unauthorized_text(chat_id: ChatId) -> String {
    format!(
        "{denied} Unauthorized.\n\n\
        {key} Your chat ID: {chat_id}\n\
        Ask the bot owner to add it to ALLOWED_CHAT_IDS.",
        denied = emoji::DENIED,
        key = emoji::KEY,
        chat_id = chat_id.0,
    )
}

pub fn not_torrent_text() -> String {
    format!(
        "{warn} This is not a torrent file!\n\n\
        Please send only files with the .torrent extension.",
        warn = emoji::WARNING,
    )
}

pub fn too_large_text(size: u32) -> String {
    format!(
        "{err} File too large ({size}). Maximum size is {max}.",
        err = emoji::ERROR,
        size = format_size(size as u64),
        max = format_size(MAX_TORRENT_FILE_SIZE as u64),
    )
}

pub fn invalid_content_text(file_name: &str) -> String {
    format!(
        "{err} '{file_name}' is not a valid .torrent file.",
        err = emoji::ERROR,
    )
}

pub fn send_torrent_hint_text() -> String {
    format!(
        "{info} Please send me a .torrent file.\n\nUse the buttons below for help!",
        info = emoji::INFO,
    )
}

/// Summary reply for a batch of uploads from one chat
pub fn upload_summary_text(entries: &[BatchEntry], user_name: &str) -> String {
    if let [entry] = entries {
        return if entry.saved {
            format!(
                "{ok} Torrent received and saved!\n\n\
                {folder} Name: {name}\n\
                Size: {size}\n\
                Status: QUEUED\n\n\
                {rocket} Your torrent client will pick it up automatically.\n\
                Happy downloading, {user_name}!",
                ok = emoji::SUCCESS,
                folder = emoji::FOLDER,
                name = entry.file_name,
                size = format_size(entry.size),
                rocket = emoji::ROCKET,
            )
        } else {
            format!(
                "{err} Failed to save '{name}'. Please try again.\n\n\
                If the problem persists, contact the administrator.",
                err = emoji::ERROR,
                name = entry.file_name,
            )
        };
    }

    let saved: Vec<&BatchEntry> = entries.iter().filter(|e| e.saved).collect();
    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| !e.saved).collect();

    let mut text = format!(
        "{ok} {} received!\n\n",
        plural(saved.len(), "torrent"),
        ok = if saved.is_empty() { emoji::ERROR } else { emoji::SUCCESS },
    );

    for (idx, entry) in saved.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} ({})\n",
            idx + 1,
            entry.file_name,
            format_size(entry.size)
        ));
    }

    if !failed.is_empty() {
        text.push_str(&format!("\n{} Failed:\n", emoji::ERROR));
        for (idx, entry) in failed.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", idx + 1, entry.file_name));
        }
    }

    if !saved.is_empty() {
        text.push_str(&format!(
            "\n{} Your torrent client will pick them up automatically.\n\
            Happy downloading, {user_name}!",
            emoji::ROCKET
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(name: &str, size: u64, saved: bool) -> BatchEntry {
        BatchEntry {
            file_name: name.to_string(),
            size,
            saved,
        }
    }

    #[test]
    fn test_welcome_echoes_chat_id_and_access() {
        let text = welcome_text("Ana", ChatId(111), true);
        assert!(text.contains("Ana"));
        assert!(text.contains("Your chat ID: 111"));
        assert!(text.contains("AUTHORIZED"));
        assert!(!text.contains("NOT AUTHORIZED"));

        let text = welcome_text("Bob", ChatId(-100222), false);
        assert!(text.contains("Your chat ID: -100222"));
        assert!(text.contains("NOT AUTHORIZED"));
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help_text();
        for cmd in ["/start", "/help", "/status", "/menu"] {
            assert!(text.contains(cmd));
        }
        assert!(text.contains("10.00 MB"));
    }

    #[test]
    fn test_status_text() {
        let report = StatusReport {
            chat_id: ChatId(222),
            authorized: false,
            watch_folder: Path::new("/watch"),
            allowed_chats: 3,
            queued_torrents: 5,
            checked_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap(),
        };
        let text = status_text(&report);
        assert!(text.contains("NOT AUTHORIZED"));
        assert!(text.contains("Chat ID: 222"));
        assert!(text.contains("Watch folder: /watch"));
        assert!(text.contains("Authorized chats: 3"));
        assert!(text.contains("Torrents waiting: 5"));
        assert!(text.contains("2024-01-01 12:30:00 UTC"));
    }

    #[test]
    fn test_author_text() {
        let text = author_text();
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("License: MIT"));
    }

    #[test]
    fn test_unauthorized_text() {
        let text = unauthorized_text(ChatId(222));
        assert!(text.to_lowercase().contains("unauthorized"));
        assert!(text.contains("222"));
    }

    #[test]
    fn test_too_large_text() {
        let text = too_large_text(20 * 1024 * 1024);
        assert!(text.contains("20.00 MB"));
        assert!(text.contains("10.00 MB"));
    }

    #[test]
    fn test_single_upload_summary() {
        let text = upload_summary_text(&[entry("ubuntu.torrent", 2048, true)], "Ana");
        assert!(text.contains("ubuntu.torrent"));
        assert!(text.contains("2.00 KB"));
        assert!(text.contains("QUEUED"));
        assert!(text.contains("Ana"));

        let text = upload_summary_text(&[entry("broken.torrent", 10, false)], "Ana");
        assert!(text.contains("Failed to save 'broken.torrent'"));
        assert!(!text.contains("QUEUED"));
    }

    #[test]
    fn test_batch_upload_summary() {
        let entries = [
            entry("a.torrent", 1024, true),
            entry("b.torrent", 10, false),
            entry("c.torrent", 2048, true),
        ];
        let text = upload_summary_text(&entries, "Ana");
        assert!(text.starts_with("✅ 2 torrents received!"));
        assert!(text.contains("1. a.torrent (1.00 KB)"));
        assert!(text.contains("2. c.torrent (2.00 KB)"));
        assert!(text.contains("Failed:\n1. b.torrent"));
        assert!(text.contains("Happy downloading, Ana!"));
    }

    #[test]
    fn test_batch_all_failed() {
        let entries = [entry("a.torrent", 1, false), entry("b.torrent", 1, false)];
        let text = upload_summary_text(&entries, "Ana");
        assert!(text.starts_with("❌ 0 torrents received!"));
        assert!(!text.contains("Happy downloading"));
    }
}
