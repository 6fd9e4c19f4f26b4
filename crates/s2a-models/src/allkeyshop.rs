use serde::{Deserialize, Serialize};

/// AllKeyShop session and the wishlist handle scraped from the profile page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AksUser {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub cookie: String,
    #[serde(rename = "wishlistID", default)]
    pub wishlist_id: u64,
}

impl AksUser {
    pub fn has_cookie(&self) -> bool {
        !self.cookie.is_empty()
    }

    /// Both halves of the handle are needed before games can be added
    pub fn has_wishlist_handle(&self) -> bool {
        !self.nickname.is_empty() && self.wishlist_id != 0
    }
}

/// A game on either the imported list or the retry queue.
///
/// `name` is the slug; `id` is the AllKeyShop product ID once known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AksGame {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl AksGame {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: None }
    }

    pub fn resolved(name: impl Into<String>, id: u64) -> Self {
        Self { name: name.into(), id: Some(id) }
    }
}

/// Contents of `aks.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AksData {
    #[serde(default)]
    pub user: AksUser,
    /// Games confirmed on the AllKeyShop wishlist
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub wishlist: Vec<AksGame>,
    /// Games that failed at some stage and are retried later
    #[serde(rename = "notYet", default, deserialize_with = "crate::null_as_empty")]
    pub not_yet: Vec<AksGame>,
}

impl AksData {
    pub fn pending_names(&self) -> Vec<String> {
        self.not_yet.iter().map(|g| g.name.clone()).collect()
    }

    pub fn pending_product_id(&self, name: &str) -> Option<u64> {
        self.not_yet.iter().find(|g| g.name == name).and_then(|g| g.id)
    }

    /// Removes every retry entry with this slug
    pub fn remove_pending(&mut self, name: &str) {
        self.not_yet.retain(|g| g.name != name);
    }
}
