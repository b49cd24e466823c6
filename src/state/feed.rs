// Comment feed: the view state holder.
// Publishes the fetch state and the avatar image selections to the UI.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ImageRef, RemoteSource};
use crate::cache::CommentStore;
use crate::error::Result;

use super::coordinator::{CoordinatorPhase, FetchCoordinator};
use super::fetch::FetchState;
use super::selection::ImageSelection;

/// Where image selections live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPersistence {
    /// Gone when the process exits.
    Memory,
    /// Written to the cache directory after every change.
    #[default]
    Durable,
}

/// Holds the comment list state and the image selections for one screen.
///
/// The fetch starts at most once per feed. Dropping the feed cancels a fetch
/// that is still running; subscribers then see their channel close.
pub struct CommentFeed {
    coordinator: Arc<FetchCoordinator>,
    store: CommentStore,
    persistence: SelectionPersistence,
    state: Arc<watch::Sender<FetchState>>,
    selections: watch::Sender<ImageSelection>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CommentFeed {
    /// Create a feed seeded with `selections`.
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: CommentStore,
        persistence: SelectionPersistence,
        selections: ImageSelection,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        let (selections, _) = watch::channel(selections);
        Self {
            coordinator: Arc::new(FetchCoordinator::new(remote, store.clone())),
            store,
            persistence,
            state: Arc::new(state),
            selections,
            task: Mutex::new(None),
        }
    }

    /// Create a feed, restoring saved selections when they are durable.
    pub async fn open(
        remote: Arc<dyn RemoteSource>,
        store: CommentStore,
        persistence: SelectionPersistence,
    ) -> Self {
        let selections = match persistence {
            SelectionPersistence::Durable => store.load_selections().await,
            SelectionPersistence::Memory => ImageSelection::new(),
        };
        Self::new(remote, store, persistence, selections)
    }

    /// Start fetching in the background. Only the first call does anything.
    pub fn start(&self) -> bool {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.is_some() {
            return false;
        }

        let coordinator = Arc::clone(&self.coordinator);
        let sink = Arc::clone(&self.state);
        *task = Some(tokio::spawn(async move {
            coordinator.run(&sink).await;
        }));
        true
    }

    /// Latest fetch state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> CoordinatorPhase {
        self.coordinator.phase()
    }

    /// Latest image selections.
    pub fn selections(&self) -> ImageSelection {
        self.selections.borrow().clone()
    }

    pub fn subscribe_selections(&self) -> watch::Receiver<ImageSelection> {
        self.selections.subscribe()
    }

    pub fn persistence(&self) -> SelectionPersistence {
        self.persistence
    }

    /// Record the image chosen for a comment and publish the whole map.
    ///
    /// The update happens under the channel's lock, so calls from several
    /// tasks never lose each other's entries. Durable feeds then write the
    /// map in the background; the store drops a write that a later
    /// snapshot has already overtaken.
    pub fn select_image(&self, comment_id: i64, image: Option<ImageRef>) {
        let mut snapshot = None;
        self.selections.send_modify(|selection| {
            selection.insert(comment_id, image);
            if self.persistence == SelectionPersistence::Durable {
                snapshot = Some((self.store.next_revision(), selection.clone()));
            }
        });
        tracing::info!(comment_id, "image selected");

        if let Some((revision, selection)) = snapshot {
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(e) = store.save_selections_at(revision, &selection).await {
                    tracing::warn!(error = %e, "failed to save image selections");
                }
            });
        }
    }

    /// Write the current selections now. No-op for in-memory feeds.
    pub async fn flush(&self) -> Result<()> {
        if self.persistence == SelectionPersistence::Memory {
            return Ok(());
        }
        let (revision, selection) = {
            // Holding the read lock keeps select_image from slipping in between.
            let current = self.selections.borrow();
            (self.store.next_revision(), current.clone())
        };
        self.store.save_selections_at(revision, &selection).await?;
        Ok(())
    }
}

impl Drop for CommentFeed {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = task.take() {
            task.abort();
        }
    }
}
