//! Constants used throughout the telegram bot

/// Watch folder used when `WATCH_FOLDER` is not set
pub const DEFAULT_WATCH_FOLDER: &str = "/watch";

/// Default time to wait for more uploads before replying with a summary
pub const DEFAULT_BATCH_WINDOW_MS: u64 = 2000;

/// Maximum accepted .torrent file size (10 MB)
pub const MAX_TORRENT_FILE_SIZE: u32 = 10 * 1024 * 1024;

/// Name used when Telegram does not report the sender's first name
pub const FALLBACK_USER_NAME: &str = "User";

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const WARNING: &str = "⚠️";
    pub const DENIED: &str = "⛔";
    pub const INFO: &str = "ℹ️";
    pub const STATUS: &str = "📊";
    pub const FOLDER: &str = "📁";
    pub const KEY: &str = "🔑";
    pub const ROBOT: &str = "🤖";
    pub const BOOK: &str = "📖";
    pub const LIST: &str = "📋";
    pub const ROCKET: &str = "🚀";
    pub const ONLINE: &str = "🟢";
    pub const BACK: &str = "🔙";
    pub const WAVE: &str = "👋";
    pub const DEVELOPER: &str = "👨‍💻";
}
