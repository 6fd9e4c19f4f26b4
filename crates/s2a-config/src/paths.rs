use anyhow::Result;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const STEAM_FILE: &str = "steam.json";
pub const AKS_FILE: &str = "aks.json";

/// Get the base path override from environment variable, if set
pub fn env_base_path() -> Option<PathBuf> {
    std::env::var("S2A_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    base_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(base_dir) = env_base_path() {
            return Ok(Self { base_dir });
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("s2a");

        Ok(Self { base_dir })
    }

    /// Use an explicit directory (the `--data-dir` flag)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    pub fn steam_file(&self) -> PathBuf {
        self.base_dir.join(STEAM_FILE)
    }

    pub fn allkeyshop_file(&self) -> PathBuf {
        self.base_dir.join(AKS_FILE)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory, where the store files used to live
        Self::new().unwrap_or_else(|_| Self::with_base_dir("."))
    }
}
