/// Error type for telegram bot operations
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Telegram API error
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    /// File download from Telegram failed
    #[error("Download error: {0}")]
    Download(#[from] teloxide::DownloadError),
    /// Writing into the watch folder failed
    #[error("Watch folder error: {0}")]
    WatchFolder(#[from] watchfolder::WatchFolderError),
    /// Transport anomaly with no typed error, such as an empty download
    #[error("{0}")]
    Message(String),
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BotError::Message("empty download for file abc".to_string());
        assert_eq!(err.to_string(), "empty download for file abc");

        let err = BotError::from(watchfolder::WatchFolderError::InvalidName("x.exe".to_string()));
        assert!(err.to_string().starts_with("Watch folder error: "));
    }
}
