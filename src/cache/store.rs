// Cache store for reading and writing cached data.
// Handles JSON serialization and atomic filesystem writes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::api::Comment;
use crate::error::Result;
use crate::state::ImageSelection;

use super::paths;

/// Suffix source so concurrent writes never share a temp file.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Read JSON from a file. A missing file is `Ok(None)`; a malformed one is an error.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if contents.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&contents)?))
}

/// Write data as JSON, replacing whatever was there.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;

    // Write atomically via a temp file of our own
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_path = path.with_extension(format!("{}.{}.tmp", std::process::id(), seq));
    let written: std::io::Result<()> = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

/// Persistent store for the comment snapshot and the image selections.
///
/// Clones share one write lock, so every writer on a cache directory is
/// serialized. Selection snapshots carry a revision; a snapshot older than
/// the one already on disk is dropped instead of written.
#[derive(Debug, Clone)]
pub struct CommentStore {
    root: PathBuf,
    /// Held for every write; guards the revision of the selections on disk.
    writes: Arc<Mutex<u64>>,
    revisions: Arc<AtomicU64>,
}

impl CommentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writes: Arc::new(Mutex::new(0)),
            revisions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Overwrite the comment snapshot.
    pub async fn save_comments(&self, comments: &[Comment]) -> Result<()> {
        let _guard = self.writes.lock().await;
        write_json(&paths::comments_path(&self.root), comments).await
    }

    /// Strict read of the comment snapshot.
    pub async fn read_comments(&self) -> Result<Option<Vec<Comment>>> {
        read_json(&paths::comments_path(&self.root)).await
    }

    /// Most recent snapshot, or empty when there is none or it cannot be decoded.
    pub async fn load_comments(&self) -> Vec<Comment> {
        match self.read_comments().await {
            Ok(Some(comments)) => comments,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable comment cache");
                Vec::new()
            }
        }
    }

    /// Next selection revision. Take it at the moment the snapshot is taken.
    pub fn next_revision(&self) -> u64 {
        self.revisions.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Overwrite the persisted image selections.
    pub async fn save_selections(&self, selection: &ImageSelection) -> Result<()> {
        self.save_selections_at(self.next_revision(), selection)
            .await
            .map(|_| ())
    }

    /// Write `selection` taken at `revision`, unless a later snapshot is
    /// already on disk. Returns whether the file was written.
    pub async fn save_selections_at(
        &self,
        revision: u64,
        selection: &ImageSelection,
    ) -> Result<bool> {
        let mut on_disk = self.writes.lock().await;
        if revision <= *on_disk {
            tracing::debug!(revision, on_disk = *on_disk, "skipping stale selections");
            return Ok(false);
        }
        write_json(&paths::selections_path(&self.root), selection).await?;
        *on_disk = revision;
        Ok(true)
    }

    /// Persisted image selections, or empty when there are none or they cannot be decoded.
    pub async fn load_selections(&self) -> ImageSelection {
        match read_json(&paths::selections_path(&self.root)).await {
            Ok(Some(selection)) => selection,
            Ok(None) => ImageSelection::new(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable image selections");
                ImageSelection::new()
            }
        }
    }
}
