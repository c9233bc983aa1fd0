//! Watch folder storage for uploaded torrent files
//!
//! This crate owns everything that touches the directory polled by the
//! external torrent client: filename sanitizing, basic torrent content
//! checks, and atomic writes so the client never sees a partial file.

pub mod error;
pub mod folder;
pub mod utils;

pub use error::{Result, WatchFolderError};
pub use folder::{SavedTorrent, WatchFolder};
pub use utils::{extract_info_hash, is_torrent_filename, looks_like_torrent, sanitize_filename};
