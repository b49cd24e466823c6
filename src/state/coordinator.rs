// Fetch coordinator.
// Shows the cached comment list while the network fetch runs, then settles
// on the network outcome and refreshes the cache on success.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::api::RemoteSource;
use crate::cache::CommentStore;

use super::fetch::FetchState;

/// Lifecycle of a coordinator. It only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorPhase {
    #[default]
    Idle,
    InFlight,
    Settled,
}

/// Runs one cache-then-network fetch cycle.
pub struct FetchCoordinator {
    remote: Arc<dyn RemoteSource>,
    store: CommentStore,
    phase: Mutex<CoordinatorPhase>,
}

impl FetchCoordinator {
    pub fn new(remote: Arc<dyn RemoteSource>, store: CommentStore) -> Self {
        Self {
            remote,
            store,
            phase: Mutex::new(CoordinatorPhase::Idle),
        }
    }

    pub fn phase(&self) -> CoordinatorPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move Idle → InFlight. False if a fetch already started.
    fn begin(&self) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != CoordinatorPhase::Idle {
            return false;
        }
        *phase = CoordinatorPhase::InFlight;
        true
    }

    fn settle(&self) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = CoordinatorPhase::Settled;
    }

    /// Run the fetch cycle, publishing every state into `sink`.
    ///
    /// The cached list is published only while `sink` still holds `Loading`,
    /// so it can never replace the network outcome. The network outcome always
    /// replaces whatever is there, a cached preview included.
    ///
    /// Returns false without touching the network when a cycle has already
    /// started on this coordinator.
    pub async fn run(&self, sink: &watch::Sender<FetchState>) -> bool {
        if !self.begin() {
            tracing::debug!("fetch already started; coalescing");
            return false;
        }
        tracing::info!("fetching comments");

        let preview = async {
            let cached = self.store.load_comments().await;
            if cached.is_empty() {
                return;
            }
            let count = cached.len();
            let shown = sink.send_if_modified(|state| {
                if state.is_loading() {
                    *state = FetchState::Success(cached);
                    true
                } else {
                    false
                }
            });
            if shown {
                tracing::debug!(count, "showing cached comments");
            }
        };

        let network = async {
            let outcome = match self.remote.fetch_comments().await {
                Ok(comments) => {
                    if let Err(e) = self.store.save_comments(&comments).await {
                        tracing::warn!(error = %e, "failed to cache comments");
                    }
                    tracing::info!(count = comments.len(), "fetched comments");
                    FetchState::Success(comments)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch comments");
                    FetchState::Error(e.user_message())
                }
            };
            sink.send_replace(outcome);
        };

        tokio::join!(preview, network);
        self.settle();
        true
    }
}
