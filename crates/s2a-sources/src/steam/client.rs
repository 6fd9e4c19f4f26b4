use crate::http::PageFetcher;
use crate::steam::api;
use crate::traits::CatalogSource;
use crate::SourceError;
use async_trait::async_trait;
use s2a_config::{DocumentStore, SteamConfig};
use s2a_models::{SteamData, SteamGame};
use std::sync::Arc;
use tracing::{debug, info};

/// Steam Web API client backed by `steam.json`
pub struct SteamClient {
    fetcher: Arc<dyn PageFetcher>,
    config: SteamConfig,
    store: DocumentStore,
    data: SteamData,
}

impl SteamClient {
    /// Load the stored document, creating an empty one if needed
    pub fn open(
        store: DocumentStore,
        config: SteamConfig,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, SourceError> {
        let data: SteamData = store.load()?;
        debug!(
            "Loaded {} cached Steam wishlist entries from {}",
            data.wishlist.len(),
            store.path().display()
        );
        Ok(Self { fetcher, config, store, data })
    }

    fn save(&self) -> Result<(), SourceError> {
        self.store.save(&self.data)?;
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for SteamClient {
    fn source_name(&self) -> &str {
        "Steam"
    }

    fn has_identity(&self) -> bool {
        self.data.user.has_id()
    }

    fn has_credential(&self) -> bool {
        self.data.user.has_key()
    }

    fn set_identity(&mut self, id: u64) -> Result<(), SourceError> {
        if id == 0 {
            return Err(SourceError::EmptyValue("Steam user ID"));
        }
        self.data.user.steam_user_id = id;
        self.save()
    }

    fn set_credential(&mut self, key: String) -> Result<(), SourceError> {
        if key.is_empty() {
            return Err(SourceError::EmptyValue("Steam API key"));
        }
        self.data.user.steam_key = key;
        self.save()
    }

    async fn get_wishlist(&mut self, refresh: bool) -> Result<Vec<SteamGame>, SourceError> {
        if !refresh {
            return Ok(self.data.wishlist.clone());
        }

        let app_ids =
            api::get_wishlist_app_ids(self.fetcher.as_ref(), &self.config, self.data.user.steam_user_id).await?;
        info!("Steam wishlist has {} entries", app_ids.len());

        self.resolve_items(&app_ids).await
    }

    async fn resolve_items(&mut self, app_ids: &[u64]) -> Result<Vec<SteamGame>, SourceError> {
        if app_ids.is_empty() {
            return Err(SourceError::NoItems);
        }

        let games = api::get_items(self.fetcher.as_ref(), &self.config, &self.data.user.steam_key, app_ids).await?;
        let added = self.data.merge_wishlist(games);
        info!(
            "Resolved {} Steam titles ({} new, {} cached)",
            app_ids.len(),
            added,
            self.data.wishlist.len()
        );

        self.save()?;
        Ok(self.data.wishlist.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::testing::ScriptedFetcher;
    use tempfile::TempDir;

    const WISHLIST: &str = "https://api.steampowered.com/IWishlistService/GetWishlist/v1/";
    const ITEMS: &str = "https://api.steampowered.com/IStoreBrowseService/GetItems/v1/";

    fn open_client(dir: &TempDir, fetcher: &Arc<ScriptedFetcher>) -> SteamClient {
        let store = DocumentStore::new(dir.path().join("steam.json"));
        SteamClient::open(store, SteamConfig::default(), fetcher.clone()).unwrap()
    }

    fn stored(dir: &TempDir) -> SteamData {
        DocumentStore::new(dir.path().join("steam.json")).load().unwrap()
    }

    #[test]
    fn test_open_creates_empty_store() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        let client = open_client(&dir, &fetcher);

        assert!(!client.has_identity());
        assert!(!client.has_credential());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("steam.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_setters_persist_immediately() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        let mut client = open_client(&dir, &fetcher);

        client.set_identity(7656).unwrap();
        client.set_credential("KEY".to_string()).unwrap();

        assert!(client.has_identity());
        assert!(client.has_credential());
        let data = stored(&dir);
        assert_eq!(data.user.steam_user_id, 7656);
        assert_eq!(data.user.steam_key, "KEY");
    }

    #[test]
    fn test_setters_reject_defaults() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        let mut client = open_client(&dir, &fetcher);

        assert!(matches!(client.set_identity(0), Err(SourceError::EmptyValue(_))));
        assert!(matches!(client.set_credential(String::new()), Err(SourceError::EmptyValue(_))));
    }

    #[tokio::test]
    async fn test_cached_wishlist_makes_no_requests() {
        let dir = TempDir::new().unwrap();
        let mut data = SteamData::default();
        data.wishlist.push(SteamGame { title: "Portal".to_string(), app_id: 400 });
        DocumentStore::new(dir.path().join("steam.json")).save(&data).unwrap();

        let fetcher = Arc::new(ScriptedFetcher::new());
        let mut client = open_client(&dir, &fetcher);

        let games = client.get_wishlist(false).await.unwrap();
        assert_eq!(games, data.wishlist);
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_merges_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut data = SteamData::default();
        data.user.steam_user_id = 7656;
        data.user.steam_key = "KEY".to_string();
        data.wishlist.push(SteamGame { title: "Half-Life 2".to_string(), app_id: 220 });
        DocumentStore::new(dir.path().join("steam.json")).save(&data).unwrap();

        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond_ok(
            WISHLIST,
            r#"{"response":{"items":[{"appid":220},{"appid":400}]}}"#,
        );
        fetcher.respond_ok(
            ITEMS,
            r#"{"response":{"store_items":[
                {"id":220,"name":"Half-Life 2: Updated","appid":220},
                {"id":400,"name":"Portal","appid":400}
            ]}}"#,
        );
        let mut client = open_client(&dir, &fetcher);

        let games = client.get_wishlist(true).await.unwrap();

        let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Half-Life 2", "Portal"]);
        assert_eq!(stored(&dir).wishlist, games);

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].ends_with("?steamid=7656"));
        assert!(requests[1].ends_with("&key=KEY"));
    }

    #[tokio::test]
    async fn test_refresh_with_empty_wishlist_is_no_items() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond_ok(WISHLIST, r#"{"response":{}}"#);
        let mut client = open_client(&dir, &fetcher);

        let err = client.get_wishlist(true).await.unwrap_err();
        assert!(matches!(err, SourceError::NoItems));
        assert_eq!(fetcher.requests_to(ITEMS), 0);
    }

    #[tokio::test]
    async fn test_wishlist_status_error_carries_code() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(WISHLIST, HttpResponse::with_status(403));
        let mut client = open_client(&dir, &fetcher);

        let err = client.get_wishlist(true).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_lookup_status_error_hides_key_and_keeps_cache() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(ITEMS, HttpResponse::with_status(401));
        let mut client = open_client(&dir, &fetcher);
        client.set_credential("SECRET".to_string()).unwrap();

        let err = client.resolve_items(&[220]).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 401, .. }));
        assert!(!err.to_string().contains("SECRET"));
        assert!(stored(&dir).wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_decode_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond_ok(ITEMS, "<html>maintenance</html>");
        let mut client = open_client(&dir, &fetcher);

        let err = client.resolve_items(&[220]).await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_resolve_items_requires_ids() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        let mut client = open_client(&dir, &fetcher);

        assert!(matches!(client.resolve_items(&[]).await, Err(SourceError::NoItems)));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.unreachable(WISHLIST);
        let mut client = open_client(&dir, &fetcher);

        let err = client.get_wishlist(true).await.unwrap_err();
        assert!(matches!(err, SourceError::Request { .. }));
    }
}
