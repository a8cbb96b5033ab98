//! Filesystem-backed blob store: one directory per container, one UTF-8
//! text file per blob.

use std::fs;
use std::path::{Path, PathBuf};

use super::{BlobStore, StorageError};

/// Blob container rooted at a directory on disk.
pub struct FsBlobStore {
    container_dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(container_dir: impl Into<PathBuf>) -> Self {
        Self {
            container_dir: container_dir.into(),
        }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        // Blob names come from safe_filename and never contain separators;
        // strip any just in case a caller hands us something else.
        let name = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "blob".to_string());
        self.container_dir.join(name)
    }
}

impl BlobStore for FsBlobStore {
    fn ensure_container(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.container_dir)?;
        Ok(())
    }

    fn put_text(&self, name: &str, text: &str) -> Result<String, StorageError> {
        let path = self.blob_path(name);
        fs::write(&path, text)?;
        Ok(format!("file://{}", path.display()))
    }

    fn get_text(&self, name: &str) -> Result<Option<String>, StorageError> {
        let path = self.blob_path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.blob_path(name).exists())
    }
}
