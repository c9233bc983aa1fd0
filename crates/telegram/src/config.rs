//! Bot configuration loaded from the environment
//!
//! The configuration is built once at startup and shared with every handler
//! as an `Arc<Config>` dependency; nothing mutates it afterwards.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use teloxide::types::ChatId;

use crate::auth::AllowList;
use crate::constants::{DEFAULT_BATCH_WINDOW_MS, DEFAULT_WATCH_FOLDER};

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_ALLOWED_CHAT_IDS: &str = "ALLOWED_CHAT_IDS";
pub const ENV_WATCH_FOLDER: &str = "WATCH_FOLDER";
pub const ENV_BATCH_WINDOW_MS: &str = "BATCH_WINDOW_MS";

/// Errors found while reading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid chat ID in ALLOWED_CHAT_IDS: {0:?}")]
    InvalidChatId(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Telegram bot token; never printed in full
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token format is "<bot id>:<secret>"; the bot id is public
        match self.0.split_once(':') {
            Some((id, _)) => write!(f, "BotToken({id}:***)"),
            None => f.write_str("BotToken(***)"),
        }
    }
}

/// Immutable bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: BotToken,
    pub allowed_chat_ids: AllowList,
    pub watch_folder: PathBuf,
    /// How long to wait for more uploads before sending one summary
    pub batch_window: Duration,
}

impl Config {
    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token = non_empty(ENV_BOT_TOKEN)
            .map(|t| BotToken::new(t.trim()))
            .ok_or(ConfigError::Missing(ENV_BOT_TOKEN))?;

        let allowed_chat_ids = non_empty(ENV_ALLOWED_CHAT_IDS)
            .ok_or(ConfigError::Missing(ENV_ALLOWED_CHAT_IDS))
            .and_then(|raw| AllowList::parse(&raw))?;
        if allowed_chat_ids.is_empty() {
            return Err(ConfigError::Missing(ENV_ALLOWED_CHAT_IDS));
        }

        let watch_folder = non_empty(ENV_WATCH_FOLDER)
            .map(|p| PathBuf::from(p.trim()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WATCH_FOLDER));

        let batch_window = match non_empty(ENV_BATCH_WINDOW_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_BATCH_WINDOW_MS,
                    value: raw,
                })?,
            None => Duration::from_millis(DEFAULT_BATCH_WINDOW_MS),
        };

        Ok(Self {
            bot_token,
            allowed_chat_ids,
            watch_folder,
            batch_window,
        })
    }

    pub fn is_authorized(&self, chat_id: ChatId) -> bool {
        self.allowed_chat_ids.is_authorized(chat_id)
    }
}
