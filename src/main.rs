// lpl: browse a post's comments in the terminal.
// Wires configuration, logging, the comment feed, and the TUI together.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lpl::api::endpoints::COMMENTS_ENDPOINT;
use lpl::api::{ApiClient, RemoteSource};
use lpl::app::App;
use lpl::cache::CommentStore;
use lpl::config::{Cli, Settings};
use lpl::error::Result;
use lpl::state::CommentFeed;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    init_logging(&settings.log_file)?;

    let client = ApiClient::new(&settings.base_url, settings.timeout)?;
    let endpoint = client.endpoint_url(COMMENTS_ENDPOINT)?.to_string();
    tracing::info!(%endpoint, cache_dir = %settings.cache_dir.display(), "starting");

    let store = CommentStore::new(&settings.cache_dir);
    let remote: Arc<dyn RemoteSource> = Arc::new(client);
    let feed = CommentFeed::open(Arc::clone(&remote), store.clone(), settings.persistence).await;
    let mut app = App::new(remote, store, feed, endpoint);

    // The draw loop blocks on terminal input; keep the runtime free for the fetch.
    let mut terminal = ratatui::try_init()?;
    let result = tokio::task::block_in_place(|| app.run(&mut terminal));
    ratatui::restore();

    if let Err(e) = app.shutdown().await {
        tracing::warn!("failed to save image selections: {}", e);
    }
    result?;
    tracing::info!("exiting");
    Ok(())
}

/// Log to a file so output never lands on the TUI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lpl=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
