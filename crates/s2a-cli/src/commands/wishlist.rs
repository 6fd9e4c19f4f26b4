use super::load_document;
use crate::output::{styled_table, Output, OutputFormat};
use crate::WishlistCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use s2a_config::{Config, DocumentStore, PathManager};
use s2a_core::{ImportOptions, ImportResult, WishlistImporter};
use s2a_models::{AksData, SteamData};
use s2a_sources::allkeyshop::api;
use s2a_sources::{AllKeyShopClient, PageFetcher, ReqwestFetcher, SteamClient};
use serde_json::json;
use std::sync::Arc;

pub async fn run_wishlist(cmd: WishlistCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        WishlistCommands::Import {
            refresh,
            from_file,
            session_cookie,
            steam_id,
            steam_key,
        } => {
            let options = ImportOptions {
                refresh,
                from_file,
                steam_id,
                steam_key,
                session_cookie,
            };
            import(options, paths, output).await
        }
        WishlistCommands::Status => status(paths, output),
    }
}

async fn import(options: ImportOptions, paths: &PathManager, output: &Output) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.base_dir().display(), e))?;

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestFetcher::new());

    let target = AllKeyShopClient::open(
        DocumentStore::new(paths.allkeyshop_file()),
        config.allkeyshop.clone(),
        Arc::clone(&fetcher),
    )?;
    let mut importer = WishlistImporter::new(Box::new(target));

    if !options.from_file {
        let catalog = SteamClient::open(
            DocumentStore::new(paths.steam_file()),
            config.steam.clone(),
            Arc::clone(&fetcher),
        )?;
        importer = importer.with_catalog(Box::new(catalog));
    }

    let result = importer.with_options(options).run().await?;
    print_result(&result, output);

    Ok(())
}

fn print_result(result: &ImportResult, output: &Output) {
    let report = &result.report;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "type": "import",
            "titles_read": result.titles_read,
            "duration_ms": result.duration.as_millis() as u64,
            "report": report,
        }));
        return;
    }

    for title in &report.imported {
        output.success(format!("{} added", title));
    }
    for failure in &report.failed {
        output.warn(format!(
            "{} ({}) failed at {}: {}",
            failure.title, failure.slug, failure.stage, failure.reason
        ));
    }

    let summary = format!(
        "{} processed, {} added, {} already in wishlist, {} queued for retry in {:.1}s",
        report.processed,
        report.imported.len(),
        report.skipped.len(),
        report.failed.len(),
        result.duration.as_secs_f64()
    );
    if report.is_clean() {
        output.success(summary);
    } else {
        output.warn(summary);
        output.info("Retry the queued titles with 's2a wishlist import --from-file'");
    }
}

fn status(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let steam: SteamData = load_document(&paths.steam_file())?;
    let aks: AksData = load_document(&paths.allkeyshop_file())?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "type": "status",
            "steam_wishlist": steam.wishlist.len(),
            "imported": aks.wishlist.len(),
            "pending": aks.not_yet,
            "wishlist_resolved": aks.user.has_wishlist_handle(),
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    let mut summary = styled_table(&["Wishlist", "Games"]);
    summary.add_row(vec![Cell::new("Steam (cached)"), Cell::new(steam.wishlist.len())]);
    summary.add_row(vec![Cell::new("AllKeyShop (imported)"), Cell::new(aks.wishlist.len())]);
    summary.add_row(vec![Cell::new("Queued for retry"), Cell::new(aks.not_yet.len())]);
    output.table(&summary);

    if aks.user.has_wishlist_handle() {
        output.info(format!(
            "AllKeyShop wishlist: {} / {}",
            aks.user.nickname.bright_cyan(),
            aks.user.wishlist_id
        ));
    }

    if aks.not_yet.is_empty() {
        output.success("Nothing queued for retry");
        return Ok(());
    }

    let mut pending = styled_table(&["Slug", "Product ID", "Product page"]);
    for game in &aks.not_yet {
        let product_id = game
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());
        pending.add_row(vec![
            Cell::new(&game.name),
            Cell::new(product_id),
            Cell::new(api::product_page_url(&config.allkeyshop.base_url, &game.name)),
        ]);
    }
    output.table(&pending);

    Ok(())
}
