pub mod config;
pub mod paths;
pub mod store;

pub use config::{AllKeyShopConfig, Config, SteamConfig};
pub use paths::{PathManager, AKS_FILE, CONFIG_FILE, STEAM_FILE};
pub use store::{DocumentStore, StoreError};
