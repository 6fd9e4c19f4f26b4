use serde::{Deserialize, Serialize};

/// Steam account whose wishlist is read
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SteamUser {
    #[serde(rename = "steamKey", default)]
    pub steam_key: String,
    #[serde(rename = "steamUserID", default)]
    pub steam_user_id: u64,
}

impl SteamUser {
    pub fn has_id(&self) -> bool {
        self.steam_user_id != 0
    }

    pub fn has_key(&self) -> bool {
        !self.steam_key.is_empty()
    }
}

/// A resolved Steam wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SteamGame {
    pub title: String,
    #[serde(rename = "appID")]
    pub app_id: u64,
}

/// Contents of `steam.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SteamData {
    #[serde(default)]
    pub user: SteamUser,
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub wishlist: Vec<SteamGame>,
}

impl SteamData {
    /// Append games whose app ID is not cached yet, keeping the order they arrive in.
    /// Returns how many were added.
    pub fn merge_wishlist(&mut self, games: impl IntoIterator<Item = SteamGame>) -> usize {
        let mut known: std::collections::HashSet<u64> =
            self.wishlist.iter().map(|g| g.app_id).collect();
        let before = self.wishlist.len();
        for game in games {
            if known.insert(game.app_id) {
                self.wishlist.push(game);
            }
        }
        self.wishlist.len() - before
    }
}
