use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub steam: SteamConfig,
    #[serde(default)]
    pub allkeyshop: AllKeyShopConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SteamConfig {
    #[serde(default = "default_wishlist_url")]
    pub wishlist_url: String,
    #[serde(default = "default_items_url")]
    pub items_url: String,
    /// Locale context sent with every item lookup
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_steam_realm")]
    pub steam_realm: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllKeyShopConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
    /// Pause before every product page request
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Statuses of the add-game call that mean the game is on the list.
    /// AllKeyShop answers 418 for games it accepted.
    #[serde(default = "default_already_added_statuses")]
    pub already_added_statuses: Vec<u16>,
}

impl AllKeyShopConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

fn default_wishlist_url() -> String {
    "https://api.steampowered.com/IWishlistService/GetWishlist/v1/".to_string()
}

fn default_items_url() -> String {
    "https://api.steampowered.com/IStoreBrowseService/GetItems/v1/".to_string()
}

fn default_language() -> String {
    "english".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_steam_realm() -> u32 {
    1
}

fn default_base_url() -> String {
    "https://www.allkeyshop.com/blog".to_string()
}

fn default_session_cookie_name() -> String {
    "wordpress_logged_in_9aae1317051b689fdd8093cf69c60dae".to_string()
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_already_added_statuses() -> Vec<u16> {
    vec![418]
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            wishlist_url: default_wishlist_url(),
            items_url: default_items_url(),
            language: default_language(),
            country_code: default_country_code(),
            steam_realm: default_steam_realm(),
        }
    }
}

impl Default for AllKeyShopConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie_name: default_session_cookie_name(),
            request_delay_ms: default_request_delay_ms(),
            already_added_statuses: default_already_added_statuses(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or the defaults when there is none
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.allkeyshop.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("allkeyshop.base_url cannot be empty"));
        }
        if self.allkeyshop.session_cookie_name.trim().is_empty() {
            return Err(anyhow::anyhow!("allkeyshop.session_cookie_name cannot be empty"));
        }
        if self.steam.wishlist_url.trim().is_empty() || self.steam.items_url.trim().is_empty() {
            return Err(anyhow::anyhow!("steam endpoint URLs cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.allkeyshop.already_added_statuses, vec![418]);
        assert_eq!(config.allkeyshop.request_delay(), Duration::from_secs(2));
        assert_eq!(config.steam.steam_realm, 1);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[allkeyshop]\nrequest_delay_ms = 0\nalready_added_statuses = [200, 418]\n",
        )
        .unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.allkeyshop.request_delay_ms, 0);
        assert_eq!(config.allkeyshop.already_added_statuses, vec![200, 418]);
        assert_eq!(config.allkeyshop.base_url, "https://www.allkeyshop.com/blog");
        assert_eq!(config.steam.language, "english");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let mut config = Config::default();
        config.steam.country_code = "FR".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[allkeyshop\nbase_url = ").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.allkeyshop.base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }
}
