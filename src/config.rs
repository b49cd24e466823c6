// Runtime configuration.
// Command-line flags with environment fallbacks, resolved into Settings.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::DEFAULT_BASE_URL;
use crate::api::client::{DEFAULT_TIMEOUT, normalize_base_url};
use crate::cache::paths;
use crate::error::{LplError, Result};
use crate::state::SelectionPersistence;

/// Browse a post's comments in the terminal.
#[derive(Parser, Debug)]
#[command(name = "lpl", version, about)]
pub struct Cli {
    /// Base URL the `comments` path is resolved against.
    #[arg(long, env = "LPL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for the comment cache, image selections, and log.
    #[arg(long, env = "LPL_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Keep avatar image selections in memory only.
    #[arg(long)]
    pub memory_selections: bool,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Log file (defaults to lpl.log in the cache directory).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub persistence: SelectionPersistence,
    pub timeout: Duration,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base_url = normalize_base_url(&cli.base_url)?.to_string();
        let cache_dir = match cli.cache_dir {
            Some(dir) => dir,
            None => paths::cache_dir().ok_or(LplError::NoCacheDir)?,
        };
        let persistence = if cli.memory_selections {
            SelectionPersistence::Memory
        } else {
            SelectionPersistence::Durable
        };
        if cli.timeout_secs == 0 {
            return Err(LplError::Other("--timeout-secs must be at least 1".to_string()));
        }
        let log_file = cli
            .log_file
            .unwrap_or_else(|| paths::log_path(&cache_dir));

        Ok(Self {
            base_url,
            cache_dir,
            persistence,
            timeout: Duration::from_secs(cli.timeout_secs),
            log_file,
        })
    }
}
