pub mod auth;
pub mod batch;
pub mod callbacks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyboards;
pub mod messages;
pub mod telegram;
pub mod types;
pub mod upload;
pub mod utils;

pub use auth::AllowList;
pub use batch::UploadBatcher;
pub use config::{Config, ConfigError};
pub use error::{BotError, BotResult};
pub use teloxide::prelude::Dispatcher;
pub use types::{Command, HandlerResult, MenuAction};
pub use upload::{IncomingDocument, TorrentSource, UploadOutcome};
