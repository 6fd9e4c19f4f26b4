use clap::{ArgAction, Parser, Subcommand};
use commands::{config, wishlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "s2a")]
#[command(about = "Steam wishlist to AllKeyShop")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Directory holding config.toml, steam.json and aks.json
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interact with your AllKeyShop wishlist
    Wishlist {
        #[command(subcommand)]
        cmd: WishlistCommands,
    },
    /// Inspect or create the configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum WishlistCommands {
    /// Import your Steam wishlist to AllKeyShop
    #[command(long_about = "Add every game on your Steam wishlist to your AllKeyShop wishlist. Games that cannot be added are kept in 'notYet' in aks.json and can be retried later with --from-file.")]
    Import {
        /// Refresh the Steam wishlist stored in steam.json
        #[arg(short = 'r', long, action = ArgAction::SetTrue)]
        refresh: bool,

        /// (Steam is omitted) Retry the games that failed previously and are stored in 'notYet' in aks.json
        #[arg(short = 'f', long, action = ArgAction::SetTrue)]
        from_file: bool,

        /// (Optional if previously used) Your AllKeyShop session cookie
        #[arg(short = 's', long, value_name = "YOUR_COOKIE")]
        session_cookie: Option<String>,

        /// (Optional if previously used) Your Steam user ID
        #[arg(short = 'i', long, value_name = "STEAM_USER_ID")]
        steam_id: Option<u64>,

        /// (Optional if previously used) Your Steam API key
        #[arg(short = 'k', long, value_name = "STEAM_API_KEY")]
        steam_key: Option<String>,
    },
    /// Show imported games and the retry queue
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths, settings and stored accounts (masks sensitive data)
    Show {
        /// Show the API key and session cookie unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config.toml with the default settings
    Init {
        /// Overwrite an existing config.toml
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let paths = commands::path_manager(cli.data_dir);

    match cli.command {
        Commands::Wishlist { cmd } => wishlist::run_wishlist(cmd, &paths, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &paths, &output)
        }
    }
}
