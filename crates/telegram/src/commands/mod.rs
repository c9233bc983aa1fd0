//! Message handlers for the Telegram bot
//!
//! - `basic`: start, help, status, menu commands and plain text
//! - `document`: uploaded .torrent files

mod basic;
mod document;

pub use basic::*;
pub use document::*;
