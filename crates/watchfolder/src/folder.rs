use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, WatchFolderError};
use crate::utils;

/// Prefix of in-flight temporary files; the leading dot and the `.part`
/// suffix keep torrent clients from picking them up
const TEMP_PREFIX: &str = ".incoming-";
const TEMP_SUFFIX: &str = ".part";

/// A torrent file that has been written into the watch folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTorrent {
    /// Sanitized file name inside the watch folder
    pub file_name: String,
    /// Full path of the written file
    pub path: PathBuf,
    /// Number of bytes written
    pub size: u64,
    /// BitTorrent info hash, when the payload could be parsed
    pub info_hash: Option<String>,
}

/// Handle to the directory polled by the torrent client
#[derive(Debug, Clone)]
pub struct WatchFolder {
    root: PathBuf,
}

impl WatchFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the folder (and parents) if it does not exist yet
    pub async fn ensure_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| WatchFolderError::io(&self.root, e))
    }

    /// Atomically write `data` under the sanitized form of `file_name`
    ///
    /// The bytes go to a hidden temporary file in the same directory which
    /// is flushed to disk and then renamed over the final name, so the
    /// torrent client only ever sees complete files. An existing file with
    /// the same name is replaced.
    ///
    /// # Errors
    /// Returns [`WatchFolderError::InvalidName`] when the name does not end in
    /// `.torrent`, or an I/O error when the write or rename fails.
    pub async fn save(&self, file_name: &str, data: Vec<u8>) -> Result<SavedTorrent> {
        let sanitized = utils::sanitize_filename(file_name)
            .ok_or_else(|| WatchFolderError::InvalidName(file_name.to_string()))?;
        let target = self.root.join(&sanitized);
        let info_hash = utils::extract_info_hash(&data);
        let size = data.len() as u64;

        let root = self.root.clone();
        let dest = target.clone();
        tokio::task::spawn_blocking(move || write_atomically(&root, &dest, &data)).await??;

        tracing::info!(
            file = %sanitized,
            size,
            info_hash = info_hash.as_deref().unwrap_or("unknown"),
            "Torrent written to watch folder"
        );

        Ok(SavedTorrent {
            file_name: sanitized,
            path: target,
            size,
            info_hash,
        })
    }

    /// Count `.torrent` files currently waiting in the folder
    pub async fn count_torrents(&self) -> Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| WatchFolderError::io(&self.root, e))?;

        let mut count = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| WatchFolderError::io(&self.root, e))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.starts_with('.') && utils::is_torrent_filename(name) {
                count += 1;
            }
        }

        Ok(count)
    }
}

fn write_atomically(dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| WatchFolderError::io(dir, e))?;

    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| WatchFolderError::io(tmp.path(), e))?;

    // tempfile creates 0600; the torrent client often runs as another user
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| WatchFolderError::io(tmp.path(), e))?;
    }

    tmp.persist(target)
        .map_err(|e| WatchFolderError::io(target, e.error))?;

    Ok(())
}
