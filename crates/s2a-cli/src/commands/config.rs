use crate::output::{styled_table, Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use super::load_document;
use s2a_config::{Config, PathManager};
use s2a_models::{AksData, SteamData};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, paths, output),
        ConfigCommands::Init { force } => init_config(force, paths, output),
    }
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config_exists = config_file.exists();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let steam: SteamData = load_document(&paths.steam_file())?;
    let aks: AksData = load_document(&paths.allkeyshop_file())?;

    let reveal = |s: &str| if full { s.to_string() } else { mask_string(s) };

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "type": "config",
            "paths": {
                "config": config_file,
                "config_exists": config_exists,
                "steam": paths.steam_file(),
                "allkeyshop": paths.allkeyshop_file(),
            },
            "config": config,
            "steam_user": {
                "steam_user_id": steam.user.steam_user_id,
                "steam_key": reveal(&steam.user.steam_key),
            },
            "allkeyshop_user": {
                "nickname": aks.user.nickname,
                "wishlist_id": aks.user.wishlist_id,
                "cookie": reveal(&aks.user.cookie),
            },
        }));
        return Ok(());
    }

    if !config_exists {
        output.warn(format!(
            "No config file at {}; using defaults. Run 's2a config init' to create one.",
            config_file.display()
        ));
    }

    let mut files = styled_table(&["File", "Path"]);
    files.add_row(vec![Cell::new("Config"), Cell::new(config_file.display())]);
    files.add_row(vec![Cell::new("Steam data"), Cell::new(paths.steam_file().display())]);
    files.add_row(vec![Cell::new("AllKeyShop data"), Cell::new(paths.allkeyshop_file().display())]);
    output.table(&files);

    let mut steam_table = styled_table(&["Steam", ""]);
    steam_table.add_row(vec![Cell::new("Wishlist URL"), Cell::new(&config.steam.wishlist_url)]);
    steam_table.add_row(vec![Cell::new("Items URL"), Cell::new(&config.steam.items_url)]);
    steam_table.add_row(vec![Cell::new("Language"), Cell::new(&config.steam.language)]);
    steam_table.add_row(vec![Cell::new("Country"), Cell::new(&config.steam.country_code)]);
    let steam_id = if steam.user.has_id() {
        steam.user.steam_user_id.to_string()
    } else {
        "<not set>".to_string()
    };
    steam_table.add_row(vec![Cell::new("User ID"), Cell::new(steam_id)]);
    steam_table.add_row(vec![Cell::new("API key"), Cell::new(reveal(&steam.user.steam_key))]);
    output.table(&steam_table);

    let mut aks_table = styled_table(&["AllKeyShop", ""]);
    aks_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.allkeyshop.base_url)]);
    aks_table.add_row(vec![Cell::new("Cookie name"), Cell::new(&config.allkeyshop.session_cookie_name)]);
    aks_table.add_row(vec![
        Cell::new("Request delay"),
        Cell::new(format!("{} ms", config.allkeyshop.request_delay_ms)),
    ]);
    let statuses: Vec<String> = config
        .allkeyshop
        .already_added_statuses
        .iter()
        .map(|s| s.to_string())
        .collect();
    aks_table.add_row(vec![Cell::new("Already-added statuses"), Cell::new(statuses.join(", "))]);
    aks_table.add_row(vec![Cell::new("Session cookie"), Cell::new(reveal(&aks.user.cookie))]);
    let wishlist = if aks.user.has_wishlist_handle() {
        format!("{} / {}", aks.user.nickname, aks.user.wishlist_id)
    } else {
        "<not resolved>".to_string()
    };
    aks_table.add_row(vec![Cell::new("Wishlist"), Cell::new(wishlist)]);
    output.table(&aks_table);

    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "{} already exists. Use --force to overwrite it.",
            config_file.display()
        ));
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.base_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("0123456789ABCDEF"), "01***EF");
    }

    #[test]
    fn test_mask_string_multibyte() {
        assert_eq!(mask_string("éàçüö"), "éà***üö");
    }
}
