use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Errors that can occur while persisting uploads
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create upload directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Local directory holding uploaded images
///
/// Files are written once under a caller-chosen unique name and never read
/// back or removed by the service.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory (and parents) if absent
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write `bytes` to a new file named `name`
    ///
    /// The file is opened with create-new semantics, so an existing file is
    /// never overwritten. On a failed write the partial file is removed.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name);

        // The handle is closed when `file` drops, on every return path.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = write_all(&mut file, bytes).await {
            drop(file);
            if let Err(e) = fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial upload {}: {}", path.display(), e);
            }
            return Err(StorageError::Write { path, source });
        }

        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());

        Ok(path)
    }

    /// Whether the upload directory is currently present
    pub async fn is_available(&self) -> bool {
        fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

async fn write_all(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));
        store.ensure_dir().await.unwrap();

        let path = store.save("a.png", b"\x89PNG\r\n\x1a\nbytes").await.unwrap();

        assert_eq!(path, dir.path().join("uploads").join("a.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG\r\n\x1a\nbytes");
    }

    #[tokio::test]
    async fn test_save_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        store.save("same.jpg", b"first").await.unwrap();
        let err = store.save("same.jpg", b"second").await.unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(std::fs::read(dir.path().join("same.jpg")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("missing"));

        assert!(!store.is_available().await);
        assert!(store.save("x.jpg", b"data").await.is_err());
        assert!(!dir.path().join("missing").join("x.jpg").exists());
    }
}
