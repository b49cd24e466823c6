// State management module.
// Fetch state, image selections, and the feed that ties them to the UI.

pub mod chooser;
pub mod coordinator;
pub mod feed;
pub mod fetch;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use chooser::ImageChooser;
pub use coordinator::{CoordinatorPhase, FetchCoordinator};
pub use feed::{CommentFeed, SelectionPersistence};
pub use fetch::FetchState;
pub use selection::ImageSelection;
