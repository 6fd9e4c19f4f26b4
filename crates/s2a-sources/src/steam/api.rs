use crate::http::PageFetcher;
use crate::SourceError;
use s2a_config::SteamConfig;
use s2a_models::SteamGame;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SteamWishlistResponse {
    #[serde(default)]
    response: SteamWishlistBody,
}

#[derive(Debug, Default, Deserialize)]
struct SteamWishlistBody {
    #[serde(default)]
    items: Vec<SteamWishlistItem>,
}

#[derive(Debug, Deserialize)]
struct SteamWishlistItem {
    appid: u64,
}

#[derive(Debug, Deserialize)]
struct SteamStoreItemsResponse {
    #[serde(default)]
    response: SteamStoreItemsBody,
}

#[derive(Debug, Default, Deserialize)]
struct SteamStoreItemsBody {
    #[serde(default)]
    store_items: Vec<SteamStoreItem>,
}

#[derive(Debug, Deserialize)]
struct SteamStoreItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    appid: u64,
}

pub fn wishlist_url(config: &SteamConfig, steam_id: u64) -> String {
    format!("{}?steamid={}", config.wishlist_url, steam_id)
}

/// Batched item lookup URL; all IDs go into one `input_json` parameter
pub fn items_url(config: &SteamConfig, steam_key: &str, app_ids: &[u64]) -> String {
    let ids: Vec<serde_json::Value> = app_ids
        .iter()
        .map(|id| serde_json::json!({ "appid": id }))
        .collect();
    let input = serde_json::json!({
        "ids": ids,
        "context": {
            "language": config.language,
            "country_code": config.country_code,
            "steam_realm": config.steam_realm,
        }
    });

    format!(
        "{}?input_json={}&key={}",
        config.items_url,
        urlencoding::encode(&input.to_string()),
        urlencoding::encode(steam_key)
    )
}

/// App IDs in wishlist order
pub fn parse_wishlist(body: &str) -> Result<Vec<u64>, SourceError> {
    let response: SteamWishlistResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    Ok(response.response.items.into_iter().map(|item| item.appid).collect())
}

/// Named store items in response order; entries Steam could not resolve carry
/// no name and are dropped
pub fn parse_store_items(body: &str) -> Result<Vec<SteamGame>, SourceError> {
    let response: SteamStoreItemsResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    Ok(response
        .response
        .store_items
        .into_iter()
        .filter_map(|item| {
            if item.name.is_empty() {
                debug!(app_id = item.appid, "Skipping store item without a name");
                return None;
            }
            Some(SteamGame { title: item.name, app_id: item.appid })
        })
        .collect())
}

async fn get_json_body(fetcher: &dyn PageFetcher, url: &str) -> Result<String, SourceError> {
    let response = fetcher.get(url, None).await?;
    if !response.is_ok() {
        return Err(SourceError::Status {
            url: url.split('?').next().unwrap_or(url).to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

/// Fetch the app IDs on a user's wishlist
pub async fn get_wishlist_app_ids(
    fetcher: &dyn PageFetcher,
    config: &SteamConfig,
    steam_id: u64,
) -> Result<Vec<u64>, SourceError> {
    let body = get_json_body(fetcher, &wishlist_url(config, steam_id)).await?;
    parse_wishlist(&body)
}

/// Fetch display titles for a batch of app IDs
pub async fn get_items(
    fetcher: &dyn PageFetcher,
    config: &SteamConfig,
    steam_key: &str,
    app_ids: &[u64],
) -> Result<Vec<SteamGame>, SourceError> {
    let body = get_json_body(fetcher, &items_url(config, steam_key, app_ids)).await?;
    parse_store_items(&body)
}
