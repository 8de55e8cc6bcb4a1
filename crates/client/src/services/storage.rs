// Persisted key/value store backing the session

use std::{io::ErrorKind, path::PathBuf};

use tokio::fs;

use crate::error::{AppError, Result};

/// String values keyed by name, one file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    base_path: PathBuf,
}

impl KeyValueStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create session directory: {e}")))?;
        Ok(())
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AppError::Internal(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.base_path.join(key))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Internal(format!("Failed to read {key}: {e}"))),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create session directory: {e}")))?;

        fs::write(&path, value)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write {key}: {e}")))?;

        Ok(())
    }

    /// Removing a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!("Failed to remove {key}: {e}"))),
        }
    }
}
