use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error decoding {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One JSON document on disk, read whole and rewritten whole.
///
/// There is no locking: two processes saving the same file will lose updates.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, first writing `{}` if the file does not exist yet
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        if !self.path.exists() {
            debug!("Initializing empty document at {}", self.path.display());
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
                }
            }
            std::fs::write(&self.path, "{}").map_err(|source| self.io_error(source))?;
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with the pretty-printed document
    pub fn save<T: Serialize>(&self, document: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, content).map_err(|source| self.io_error(source))?;
        debug!("Saved {}", self.path.display());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
