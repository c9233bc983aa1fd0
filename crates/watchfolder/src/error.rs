use std::path::PathBuf;

/// Errors raised while writing into or reading the watch folder
#[derive(Debug, thiserror::Error)]
pub enum WatchFolderError {
    #[error("not a .torrent file name: {0:?}")]
    InvalidName(String),

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("blocking write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WatchFolderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WatchFolderError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchFolderError>;
