use crate::utils::path_is_valid;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::fs::File;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid file name")]
    InvalidName,
    #[error("Not found")]
    NotFound,
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// The directory uploads land in. Clones share the same path, and the path
/// only changes through [`StorageDir::set`].
#[derive(Debug, Clone)]
pub struct StorageDir {
    path: Arc<RwLock<PathBuf>>,
}

impl StorageDir {
    pub fn new(path: PathBuf) -> StorageDir {
        StorageDir {
            path: Arc::new(RwLock::new(path)),
        }
    }

    /// Snapshot of the current directory. Requests already holding a
    /// snapshot keep using it after a `set`.
    pub fn path(&self) -> PathBuf {
        self.path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switches to `path`, creating it when missing. Returns the absolute
    /// directory now in use.
    pub fn set(&self, path: &Path) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(path)?;
        let path = path.canonicalize()?;

        let mut current = self.path.write().unwrap_or_else(PoisonError::into_inner);
        *current = path.clone();
        tracing::info!("storage directory set to {}", path.display());

        Ok(path)
    }

    /// Resolves a stored name inside the directory, refusing anything that
    /// could point elsewhere.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !path_is_valid(name) {
            return Err(StorageError::InvalidName);
        }
        Ok(self.path().join(name))
    }
}

/// Opens a stored file for reading, with its length.
pub async fn open_stored(storage: &StorageDir, name: &str) -> Result<(File, u64), StorageError> {
    let path = storage.resolve(name)?;

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StorageError::NotFound),
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(StorageError::NotFound);
    }

    let file = File::open(&path).await?;
    Ok((file, metadata.len()))
}
