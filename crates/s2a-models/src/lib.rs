pub mod allkeyshop;
pub mod steam;

pub use allkeyshop::{AksData, AksGame, AksUser};
pub use steam::{SteamData, SteamGame, SteamUser};

use serde::{Deserialize, Deserializer};

/// Older store files write empty lists as `null`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
