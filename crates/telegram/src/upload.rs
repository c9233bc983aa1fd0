//! Torrent upload pipeline
//!
//! [`ingest`] decides what happens to an uploaded document: it checks the
//! sender against the allow-list, validates name and size, downloads the
//! content through a [`TorrentSource`], and writes it into the watch folder.
//! Nothing is downloaded or written unless every earlier check passed.

use async_trait::async_trait;
use teloxide::{net::Download, prelude::*, types::Document};
use watchfolder::{SavedTorrent, WatchFolder};

use crate::config::Config;
use crate::constants::MAX_TORRENT_FILE_SIZE;
use crate::error::{BotError, BotResult};

/// Document attached to an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingDocument {
    pub file_id: String,
    pub file_name: Option<String>,
    pub size: u32,
}

impl From<&Document> for IncomingDocument {
    fn from(document: &Document) -> Self {
        Self {
            file_id: document.file.id.clone(),
            file_name: document.file_name.clone(),
            size: document.file.size,
        }
    }
}

/// Where uploaded file contents come from
#[async_trait]
pub trait TorrentSource: Send + Sync {
    /// Download the full content of the file with the given id
    async fn fetch(&self, file_id: &str) -> BotResult<Vec<u8>>;
}

#[async_trait]
impl TorrentSource for Bot {
    async fn fetch(&self, file_id: &str) -> BotResult<Vec<u8>> {
        let file = self.get_file(file_id).await?;
        let mut data = Vec::new();
        self.download_file(&file.path, &mut data).await?;
        if data.is_empty() {
            return Err(BotError::Message(format!("empty download for file {}", file_id)));
        }
        Ok(data)
    }
}

/// What happened to an uploaded document
#[derive(Debug)]
pub enum UploadOutcome {
    /// Sender is not in the allow-list
    Unauthorized,
    /// Missing name or not a `.torrent` extension
    NotTorrent,
    /// Larger than [`MAX_TORRENT_FILE_SIZE`]
    TooLarge { size: u32 },
    /// Downloaded bytes are not a bencoded torrent
    InvalidContent { file_name: String },
    /// Written into the watch folder
    Saved(SavedTorrent),
    /// Download or write failed
    Failed {
        file_name: String,
        size: u64,
        error: BotError,
    },
}

/// Run the upload pipeline for one document
pub async fn ingest<S>(
    config: &Config,
    folder: &WatchFolder,
    chat_id: ChatId,
    document: &IncomingDocument,
    source: &S,
) -> UploadOutcome
where
    S: TorrentSource + ?Sized,
{
    if !config.is_authorized(chat_id) {
        tracing::warn!(chat_id = chat_id.0, "Unauthorized upload attempt");
        return UploadOutcome::Unauthorized;
    }

    let file_name = match document.file_name.as_deref() {
        Some(name) if watchfolder::sanitize_filename(name).is_some() => name,
        other => {
            tracing::info!(chat_id = chat_id.0, file = ?other, "Rejected non-torrent upload");
            return UploadOutcome::NotTorrent;
        }
    };

    if document.size > MAX_TORRENT_FILE_SIZE {
        tracing::info!(chat_id = chat_id.0, file = file_name, size = document.size, "Rejected oversized upload");
        return UploadOutcome::TooLarge {
            size: document.size,
        };
    }

    tracing::info!(chat_id = chat_id.0, file = file_name, size = document.size, "Received torrent file");

    let data = match source.fetch(&document.file_id).await {
        Ok(data) => data,
        Err(error) => {
            tracing::error!(chat_id = chat_id.0, file = file_name, error = ?error, "Failed to download torrent file");
            return UploadOutcome::Failed {
                file_name: file_name.to_string(),
                size: document.size as u64,
                error,
            };
        }
    };

    if data.len() > MAX_TORRENT_FILE_SIZE as usize {
        tracing::info!(
            chat_id = chat_id.0,
            file = file_name,
            declared = document.size,
            actual = data.len(),
            "Rejected upload larger than its declared size"
        );
        return UploadOutcome::TooLarge {
            size: u32::try_from(data.len()).unwrap_or(u32::MAX),
        };
    }

    if !watchfolder::looks_like_torrent(&data) {
        tracing::info!(chat_id = chat_id.0, file = file_name, "Rejected upload with invalid torrent content");
        return UploadOutcome::InvalidContent {
            file_name: file_name.to_string(),
        };
    }

    let size = data.len() as u64;
    match folder.save(file_name, data).await {
        Ok(saved) => UploadOutcome::Saved(saved),
        Err(err) => {
            let error = BotError::from(err);
            tracing::error!(chat_id = chat_id.0, file = file_name, error = ?error, "Failed to save torrent file");
            UploadOutcome::Failed {
                file_name: file_name.to_string(),
                size,
                error,
            }
        }
    }
}
