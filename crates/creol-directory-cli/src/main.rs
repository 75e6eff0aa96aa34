//! creol-directory - render CREOL people and alumni listings from the command line.
//!
//! Prints the HTML fragment a page would embed. Attributes are passed as
//! `key=value` pairs with the same names the page shortcodes accept:
//!
//! ```text
//! creol-directory people grpname1=Faculty display=grid columns=4
//! creol-directory alumni year=2020 display=table
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use creol_directory_core::{
    clear_all_cache, uninstall, ApiClient, Attributes, CacheStore, Config, Directory,
    FileCacheStore, JsonSettingsStore, Operator,
};

#[derive(Parser, Debug)]
#[command(name = "creol-directory", version, about = "Render CREOL people and alumni directories")]
struct Cli {
    /// Directory API endpoint
    #[arg(long, env = "CREOL_API_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Site scope for the file cache
    #[arg(long, env = "CREOL_SITE", global = true)]
    site: Option<String>,

    /// Root of the file cache
    #[arg(long, env = "CREOL_CACHE_DIR", global = true)]
    cache_dir: Option<PathBuf>,

    /// JSON file holding the settings bundles
    #[arg(long = "settings", env = "CREOL_SETTINGS_FILE", global = true)]
    settings_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the people directory
    People {
        /// Attributes as key=value
        #[arg(value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Render the alumni directory
    Alumni {
        #[arg(value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Delete every cached directory response for the site
    ClearCache,
    /// Delete cached directory responses for all sites
    Uninstall,
}

/// Initialize the tracing subscriber for logging.
///
/// RUST_LOG controls the level (default `warn`). The returned guard must be
/// held until exit so buffered file output is flushed.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

fn parse_attrs(pairs: &[String]) -> Result<Attributes> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
            _ => bail!("Invalid attribute '{}', expected key=value", pair),
        })
        .collect()
}

struct Paths {
    cache_root: PathBuf,
    settings: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli) -> Result<Self> {
        let cache_root = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => Config::cache_root()?,
        };
        let settings = match &cli.settings_file {
            Some(path) => path.clone(),
            None => Config::settings_path()?,
        };
        Ok(Self { cache_root, settings })
    }
}

fn site_store(root: &Path, site: Option<&str>) -> Result<FileCacheStore> {
    match site {
        Some(site) => FileCacheStore::for_site(root, site),
        None => FileCacheStore::new(root.to_path_buf()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_ref())?;

    let config = Config::load()?;
    let paths = Paths::resolve(&cli)?;
    let site = cli.site.clone().or_else(|| config.site.clone());
    debug!(cache_root = ?paths.cache_root, settings = ?paths.settings, ?site, "Resolved paths");

    match &cli.command {
        Command::People { attrs } | Command::Alumni { attrs } => {
            let attrs = parse_attrs(attrs)?;
            let base_url = cli
                .base_url
                .clone()
                .unwrap_or_else(|| config.api_base_url().to_string());

            let directory = Directory::new(
                ApiClient::with_base_url(base_url)?,
                Arc::new(site_store(&paths.cache_root, site.as_deref())?),
                Arc::new(JsonSettingsStore::new(paths.settings)),
            );

            let html = if matches!(cli.command, Command::People { .. }) {
                directory.people(&attrs).await
            } else {
                directory.alumni(&attrs).await
            };
            println!("{}", html);
        }
        Command::ClearCache => {
            let store = site_store(&paths.cache_root, site.as_deref())?;
            // Local CLI users own the cache directory
            let removed = clear_all_cache(&store, &Operator::admin())?;
            info!(removed, "Cache cleared");
            println!("Removed {} cached responses", removed);
        }
        Command::Uninstall => {
            let stores = FileCacheStore::all_sites(&paths.cache_root)?;
            let removed = uninstall(stores.iter().map(|s| s as &dyn CacheStore))?;
            println!("Removed {} cached responses", removed);
        }
    }

    Ok(())
}
