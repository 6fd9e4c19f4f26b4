use async_trait::async_trait;
use s2a_models::SteamGame;
use crate::report::ImportReport;
use crate::SourceError;

/// Where wishlist titles are read from
#[async_trait]
pub trait CatalogSource: Send {
    fn source_name(&self) -> &str;

    // Account configuration
    fn has_identity(&self) -> bool;
    fn has_credential(&self) -> bool;
    fn set_identity(&mut self, id: u64) -> Result<(), SourceError>;
    fn set_credential(&mut self, key: String) -> Result<(), SourceError>;

    /// Cached wishlist, or a fresh one from the API when `refresh` is set
    async fn get_wishlist(&mut self, refresh: bool) -> Result<Vec<SteamGame>, SourceError>;

    /// Look up titles for app IDs and merge them into the cached wishlist
    async fn resolve_items(&mut self, app_ids: &[u64]) -> Result<Vec<SteamGame>, SourceError>;
}

/// Where wishlist titles are written to
#[async_trait]
pub trait TargetSink: Send {
    fn source_name(&self) -> &str;

    fn has_credential(&self) -> bool;
    fn set_credential(&mut self, cookie: String) -> Result<(), SourceError>;

    /// Add every title to the wishlist. With `from_file`, `titles` is ignored
    /// and the stored retry queue is used instead.
    ///
    /// Titles that fail are queued for retry and reported; only persistence
    /// failures abort the batch.
    async fn import(&mut self, from_file: bool, titles: &[String]) -> Result<ImportReport, SourceError>;
}
