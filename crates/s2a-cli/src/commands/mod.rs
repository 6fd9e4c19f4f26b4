pub mod config;
pub mod wishlist;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use s2a_config::{DocumentStore, PathManager};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `--data-dir` wins over `S2A_HOME` and the platform config directory
pub fn path_manager(data_dir: Option<PathBuf>) -> PathManager {
    match data_dir {
        Some(dir) => PathManager::with_base_dir(dir),
        None => PathManager::default(),
    }
}

/// Read a store document without creating it; read-only commands must not
/// leave an empty `{}` file behind
pub fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        debug!("{} does not exist yet", path.display());
        return Ok(T::default());
    }
    DocumentStore::new(path.to_path_buf())
        .load()
        .map_err(|e| eyre!("{}", e))
}
