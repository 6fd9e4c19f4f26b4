use crate::allkeyshop::api;
use crate::allkeyshop::parser::{make_slug, parse_id, PagePatterns};
use crate::http::{PageFetcher, SessionCookie};
use crate::report::{FailureStage, ImportReport};
use crate::traits::TargetSink;
use crate::SourceError;
use async_trait::async_trait;
use s2a_config::{AllKeyShopConfig, DocumentStore};
use s2a_models::{AksData, AksGame};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Scraping client for the AllKeyShop wishlist, backed by `aks.json`
pub struct AllKeyShopClient {
    fetcher: Arc<dyn PageFetcher>,
    config: AllKeyShopConfig,
    patterns: PagePatterns,
    store: DocumentStore,
    data: AksData,
}

impl AllKeyShopClient {
    /// Load the stored document, creating an empty one if needed
    pub fn open(
        store: DocumentStore,
        config: AllKeyShopConfig,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, SourceError> {
        let data: AksData = store.load()?;
        debug!(
            "Loaded AllKeyShop state from {}: {} imported, {} pending",
            store.path().display(),
            data.wishlist.len(),
            data.not_yet.len()
        );
        Ok(Self {
            fetcher,
            config,
            patterns: PagePatterns::new()?,
            store,
            data,
        })
    }

    fn save(&self) -> Result<(), SourceError> {
        self.store.save(&self.data)?;
        Ok(())
    }

    fn session_cookie(&self) -> SessionCookie {
        SessionCookie {
            name: self.config.session_cookie_name.clone(),
            value: self.data.user.cookie.clone(),
        }
    }

    /// GET an authenticated page; anything but 200 is an error
    async fn get_page(&self, url: &str) -> Result<String, SourceError> {
        let response = self.fetcher.get(url, Some(&self.session_cookie())).await?;
        if !response.is_ok() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Scrape the product page for the AllKeyShop product ID
    async fn fetch_product_id(&self, slug: &str) -> Result<u64, SourceError> {
        let url = api::product_page_url(&self.config.base_url, slug);
        let body = self.get_page(&url).await?;

        let digits = self
            .patterns
            .product_id(&body)
            .ok_or_else(|| SourceError::ProductIdNotFound { slug: slug.to_string() })?;

        parse_id(digits).map_err(|source| SourceError::InvalidProductId {
            value: digits.to_string(),
            source,
        })
    }

    /// Scrape nickname and wishlist ID from the profile page and persist them
    async fn update_wishlist_handle(&mut self) -> Result<(), SourceError> {
        let url = api::profile_wishlist_url(&self.config.base_url);
        let body = self.get_page(&url).await?;

        let (nickname, digits) = self
            .patterns
            .wishlist_handle(&body)
            .ok_or(SourceError::WishlistNotFound)?;
        let wishlist_id = parse_id(digits).map_err(|source| SourceError::InvalidWishlistId {
            value: digits.to_string(),
            source,
        })?;

        info!(nickname, wishlist_id, "Found AllKeyShop wishlist");
        self.data.user.nickname = nickname.to_string();
        self.data.user.wishlist_id = wishlist_id;
        self.save()
    }

    async fn add_game_to_wishlist(&mut self, product_id: u64) -> Result<(), SourceError> {
        if !self.data.user.has_wishlist_handle() {
            self.update_wishlist_handle().await?;
        }

        let url = api::add_game_url(&self.config.base_url, self.data.user.wishlist_id, product_id);
        let response = self.fetcher.get(&url, Some(&self.session_cookie())).await?;

        if self.config.already_added_statuses.contains(&response.status) {
            debug!(product_id, status = response.status, "Add-game answered with an accepted status");
            return Ok(());
        }
        if !response.is_ok() {
            return Err(SourceError::Status {
                url,
                status: response.status,
            });
        }
        Ok(())
    }

    /// Queue a slug for retry, once. A product ID learned on a later failure
    /// is kept on the existing entry.
    fn record_pending(&mut self, pending: &mut HashSet<String>, slug: &str, product_id: Option<u64>) {
        if pending.insert(slug.to_string()) {
            self.data.not_yet.push(AksGame {
                name: slug.to_string(),
                id: product_id,
            });
            return;
        }
        if product_id.is_some() {
            for game in self.data.not_yet.iter_mut().filter(|g| g.name == slug) {
                game.id = product_id;
            }
        }
    }
}

#[async_trait]
impl TargetSink for AllKeyShopClient {
    fn source_name(&self) -> &str {
        "AllKeyShop"
    }

    fn has_credential(&self) -> bool {
        self.data.user.has_cookie()
    }

    fn set_credential(&mut self, cookie: String) -> Result<(), SourceError> {
        if cookie.is_empty() {
            return Err(SourceError::EmptyValue("session cookie"));
        }
        self.data.user.cookie = cookie;
        self.save()
    }

    async fn import(&mut self, from_file: bool, titles: &[String]) -> Result<ImportReport, SourceError> {
        let mut imported: HashSet<String> = self.data.wishlist.iter().map(|g| g.name.clone()).collect();
        let mut pending: HashSet<String> = self.data.not_yet.iter().map(|g| g.name.clone()).collect();

        let titles: Vec<String> = if from_file {
            self.data.pending_names()
        } else {
            titles.to_vec()
        };
        info!(
            from_file,
            "Importing {} titles ({} already on the wishlist)",
            titles.len(),
            imported.len()
        );

        let delay = self.config.request_delay();
        let mut report = ImportReport::default();

        for title in &titles {
            report.processed += 1;
            let slug = make_slug(title);
            if imported.contains(&slug) {
                report.skipped.push(slug);
                continue;
            }

            sleep(delay).await;

            let product_id = match self.data.pending_product_id(&slug) {
                Some(product_id) => {
                    debug!(slug = %slug, product_id, "Reusing product ID from retry queue");
                    product_id
                }
                None => match self.fetch_product_id(&slug).await {
                    Ok(product_id) => product_id,
                    Err(err) => {
                        let stage = FailureStage::of_lookup(&err);
                        warn!(title = %title, slug = %slug, stage = %stage, "Couldn't resolve product ID: {}", err);
                        self.record_pending(&mut pending, &slug, None);
                        report.record_failure(title, &slug, stage, &err);
                        self.save()?;
                        continue;
                    }
                },
            };

            if let Err(err) = self.add_game_to_wishlist(product_id).await {
                if err.is_fatal() {
                    return Err(err);
                }
                warn!(title = %title, slug = %slug, product_id, "Couldn't add to wishlist: {}", err);
                self.record_pending(&mut pending, &slug, Some(product_id));
                report.record_failure(title, &slug, FailureStage::Add, &err);
                self.save()?;
                continue;
            }

            info!(slug = %slug, product_id, "Saved to wishlist");
            self.data.wishlist.push(AksGame::resolved(slug.clone(), product_id));
            imported.insert(slug.clone());
            if pending.remove(&slug) {
                self.data.remove_pending(&slug);
            }
            self.save()?;
            report.imported.push(slug);
        }

        self.save()?;
        info!(
            "Import finished: {} added, {} skipped, {} queued for retry",
            report.imported.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }
}
