use s2a_sources::{CatalogSource, ImportReport, SourceError, TargetSink};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("steamID is required. please use -i <STEAM_USER_ID>")]
    MissingSteamId,
    #[error("steamKey is required. please use -k <STEAM_API_KEY>")]
    MissingSteamKey,
    #[error("session cookie is required. please use -s <YOUR_COOKIE>")]
    MissingSessionCookie,
    #[error("no catalog source available to read titles from")]
    MissingCatalog,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// What to import and which stored settings to replace first
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Re-read the wishlist from the catalog API instead of the cached copy
    pub refresh: bool,
    /// Skip the catalog and retry the target's queue
    pub from_file: bool,
    pub steam_id: Option<u64>,
    pub steam_key: Option<String>,
    pub session_cookie: Option<String>,
}

#[derive(Debug)]
pub struct ImportResult {
    /// Titles handed to the target; zero for queue retries
    pub titles_read: usize,
    pub report: ImportReport,
    pub duration: Duration,
}

/// Reads titles from the catalog and pushes them to the target wishlist
pub struct WishlistImporter {
    catalog: Option<Box<dyn CatalogSource>>,
    target: Box<dyn TargetSink>,
    options: ImportOptions,
}

impl WishlistImporter {
    pub fn new(target: Box<dyn TargetSink>) -> Self {
        Self {
            catalog: None,
            target,
            options: ImportOptions::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: Box<dyn CatalogSource>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(&mut self) -> Result<ImportResult, ImportError> {
        let start = Instant::now();

        let titles = if self.options.from_file {
            debug!("Retrying queued titles; catalog skipped");
            Vec::new()
        } else {
            self.read_catalog_titles().await?
        };

        if let Some(cookie) = self.options.session_cookie.take().filter(|c| !c.is_empty()) {
            self.target.set_credential(cookie)?;
        }
        if !self.target.has_credential() {
            return Err(ImportError::MissingSessionCookie);
        }

        info!("Adding games to {}...", self.target.source_name());
        let report = self.target.import(self.options.from_file, &titles).await?;

        if !report.is_clean() {
            warn!(
                "{} titles could not be added and were queued for retry",
                report.failed.len()
            );
        }

        Ok(ImportResult {
            titles_read: titles.len(),
            report,
            duration: start.elapsed(),
        })
    }

    async fn read_catalog_titles(&mut self) -> Result<Vec<String>, ImportError> {
        let catalog = self.catalog.as_mut().ok_or(ImportError::MissingCatalog)?;

        if let Some(id) = self.options.steam_id.filter(|id| *id != 0) {
            catalog.set_identity(id)?;
        }
        if let Some(key) = self.options.steam_key.take().filter(|k| !k.is_empty()) {
            catalog.set_credential(key)?;
        }

        if !catalog.has_identity() {
            return Err(ImportError::MissingSteamId);
        }
        if !catalog.has_credential() {
            return Err(ImportError::MissingSteamKey);
        }

        if self.options.refresh {
            info!("Reading {} wishlist from the API...", catalog.source_name());
        } else {
            info!("Reading {} wishlist from file...", catalog.source_name());
        }
        let wishlist = catalog.get_wishlist(self.options.refresh).await?;
        if wishlist.is_empty() && !self.options.refresh {
            warn!("Cached {} wishlist is empty; use --refresh to fetch it", catalog.source_name());
        }

        Ok(wishlist.into_iter().map(|game| game.title).collect())
    }
}
